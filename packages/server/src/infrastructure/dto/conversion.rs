//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, InboundPayload};
use crate::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

// ========================================
// DTO → Domain
// ========================================

impl From<ClientMessage> for InboundPayload {
    fn from(dto: ClientMessage) -> Self {
        Self::Parsed {
            user: dto.user,
            text: dto.text,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

/// The broadcast copy (no `self` flag). Use [`ServerMessage::as_echo`] for the sender's copy.
impl From<ChatMessage> for ServerMessage {
    fn from(model: ChatMessage) -> Self {
        Self::Chat {
            id: model.id.into_string(),
            user: model.user.into_string(),
            text: model.text.into_string(),
            ts: model.ts.value(),
            is_self: false,
        }
    }
}
