//! Entities
//!
//! - `Connection`: 接続 1 本分のハンドル（識別子 + 送信キュー）
//! - `InboundPayload`: クライアントから届いたフレームを境界で解釈した結果
//! - `ChatMessage`: サーバーが採番・時刻付与した正規のチャットメッセージ

use super::{ConnectionId, MessageId, MessageText, PushError, PusherChannel, Timestamp, UserName};

/// Handle to one open WebSocket connection.
///
/// Frames are queued on an unbounded channel drained by the connection's own
/// writer task, so pushing never waits on the network. Once the writer task
/// stops, the channel closes and the connection counts as closed.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    channel: PusherChannel,
}

impl Connection {
    pub fn new(id: ConnectionId, channel: PusherChannel) -> Self {
        Self { id, channel }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// `true` while the writer task still accepts frames.
    pub fn is_open(&self) -> bool {
        !self.channel.is_closed()
    }

    /// Queue a text frame for this connection.
    pub fn push(&self, content: &str) -> Result<(), PushError> {
        self.channel
            .send(content.to_string())
            .map_err(|_| PushError::ConnectionClosed(self.id))
    }
}

/// An inbound frame after tolerant parsing.
///
/// Only `user` and `text` are ever taken from the client; any other field
/// (`id`, `ts`, `type`, `self`, ...) is dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// The frame was a JSON object.
    Parsed {
        user: Option<String>,
        text: Option<String>,
    },
    /// The frame was not a JSON object; the raw frame becomes the text.
    Fallback { text: String },
}

/// Canonical chat message as relayed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub user: UserName,
    pub text: MessageText,
    pub ts: Timestamp,
}

impl ChatMessage {
    /// Build the canonical message from an inbound payload.
    ///
    /// `id` and `ts` are supplied by the relay, never by the payload.
    pub fn from_inbound(payload: InboundPayload, id: MessageId, ts: Timestamp) -> Self {
        let (user, text) = match payload {
            InboundPayload::Parsed { user, text } => (user, text),
            InboundPayload::Fallback { text } => (None, Some(text)),
        };

        Self {
            id,
            user: UserName::from_input(user),
            text: MessageText::from_input(text),
            ts,
        }
    }
}
