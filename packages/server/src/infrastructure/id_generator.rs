//! UUID based message id generation.

use uuid::Uuid;

use crate::domain::{MessageId, MessageIdGenerator};

/// Generates message ids from random (v4) UUIDs in their simple, hyphen-less form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidMessageIdGenerator;

impl MessageIdGenerator for UuidMessageIdGenerator {
    fn generate(&self) -> MessageId {
        MessageId::new(Uuid::new_v4().simple().to_string())
    }
}
