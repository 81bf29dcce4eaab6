//! JSON frames exchanged between the relay and its clients.
//!
//! Server -> client:
//!
//! ```text
//! { "type": "system", "text": string }
//! { "type": "chat", "id": string, "user": string, "text": string, "ts": number, "self"?: true }
//! ```
//!
//! Client -> server: `{ "user"?: string, "text": string }` or any bare text frame.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Greeting pushed to a connection right after the upgrade.
pub const WELCOME_TEXT: &str = "Welcome to the chat!";

/// Frame sent from the relay to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    System {
        text: String,
    },
    Chat {
        id: String,
        user: String,
        text: String,
        ts: i64,
        /// Only set on the copy echoed back to the sender.
        #[serde(
            rename = "self",
            default,
            skip_serializing_if = "std::ops::Not::not"
        )]
        is_self: bool,
    },
}

impl ServerMessage {
    /// The greeting pushed to a freshly upgraded connection.
    pub fn welcome() -> Self {
        Self::System {
            text: WELCOME_TEXT.to_string(),
        }
    }

    /// Copy of this message marked for delivery back to its sender.
    pub fn as_echo(&self) -> Self {
        match self {
            Self::Chat {
                id, user, text, ts, ..
            } => Self::Chat {
                id: id.clone(),
                user: user.clone(),
                text: text.clone(),
                ts: *ts,
                is_self: true,
            },
            system @ Self::System { .. } => system.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frame sent from a client to the relay.
///
/// Fields that are present but not strings are treated as absent. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub user: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub text: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}
