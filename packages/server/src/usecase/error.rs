//! UseCase errors.

use thiserror::Error;

use crate::domain::PushError;

/// Errors while bringing a new connection into the relay.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Failed to encode welcome message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to push welcome message: {0}")]
    Push(#[from] PushError),
}

/// Errors while relaying one inbound frame.
///
/// Delivery failures are not errors: they are skipped per recipient.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to encode chat message: {0}")]
    Encode(#[from] serde_json::Error),
}
