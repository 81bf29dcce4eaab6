//! WebSocket message DTOs.
//!
//! The frame types are shared with the client through `hiroba_shared::protocol`;
//! this module adds the relay's tolerant reading of inbound frames.

use serde_json::Value;

pub use hiroba_shared::protocol::{ClientMessage, ServerMessage};

use crate::domain::InboundPayload;

/// Interpret one raw inbound frame.
///
/// A JSON object becomes [`InboundPayload::Parsed`]; anything else (invalid
/// JSON, arrays, numbers, strings, `null`) becomes [`InboundPayload::Fallback`]
/// carrying the whole frame as text.
pub fn parse_inbound(raw: &str) -> InboundPayload {
    let fallback = || InboundPayload::Fallback {
        text: raw.to_string(),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => match serde_json::from_value::<ClientMessage>(value) {
            Ok(message) => message.into(),
            Err(e) => {
                tracing::debug!("Failed to read client message fields: {}", e);
                fallback()
            }
        },
        Ok(_) => {
            tracing::debug!("Inbound frame is not a JSON object, using raw text");
            fallback()
        }
        Err(e) => {
            tracing::debug!("Inbound frame is not JSON ({}), using raw text", e);
            fallback()
        }
    }
}
