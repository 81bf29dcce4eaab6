//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The initial connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the connection or the stream failed
    #[error("Connection lost")]
    ConnectionLost,

    /// The line editor could not be started
    #[error("Readline error: {0}")]
    Readline(String),
}
