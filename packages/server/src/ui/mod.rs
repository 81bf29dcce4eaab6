//! UI layer: the axum server, its shared state and request handlers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerError};
