//! Message identifier generation.

use super::MessageId;

/// Source of fresh, unique message identifiers.
///
/// Identifiers are always produced on the server; nothing a client sends is
/// ever used as a message id.
#[cfg_attr(test, mockall::automock)]
pub trait MessageIdGenerator: Send + Sync {
    fn generate(&self) -> MessageId;
}
