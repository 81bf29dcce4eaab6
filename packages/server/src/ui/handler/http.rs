//! Plain HTTP responses served on the relay port.

/// Body returned to any request that is not a WebSocket upgrade.
pub const HEALTH_TEXT: &str = "WebSocket server is running.\n";

/// Health check endpoint (`200 OK`, `text/plain`)
pub async fn health_check() -> &'static str {
    HEALTH_TEXT
}
