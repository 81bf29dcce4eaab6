//! WebSocket chat relay.
//!
//! Every frame received from a client is turned into a canonical chat message
//! (server-assigned `id` and `ts`), echoed to the sender with `self: true` and
//! broadcast to every other open connection.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
