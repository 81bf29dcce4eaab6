//! Domain errors.

use thiserror::Error;

use super::ConnectionId;

/// Failure to queue a frame for one connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    /// The connection's outbound queue is gone (closing or closed).
    #[error("Connection '{0}' is closed")]
    ConnectionClosed(ConnectionId),
}
