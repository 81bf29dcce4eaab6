//! Request handlers.

pub mod http;
pub mod websocket;

pub use websocket::entry_handler;
