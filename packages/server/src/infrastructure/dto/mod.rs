//! Data Transfer Objects (DTOs) for the relay.
//!
//! - `websocket`: JSON frames exchanged over the WebSocket
//! - `conversion`: DTO <-> domain conversions

pub mod conversion;
pub mod websocket;
