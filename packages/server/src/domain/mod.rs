//! Domain layer of the relay.
//!
//! Holds the value objects, entities and the traits (registry, id generator)
//! that the usecase layer depends on. Concrete implementations live in the
//! infrastructure layer.

pub mod entity;
pub mod error;
pub mod id_generator;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, Connection, InboundPayload};
pub use error::PushError;
pub use id_generator::MessageIdGenerator;
pub use registry::{ConnectionRegistry, PusherChannel};
pub use value_object::{ConnectionId, MessageId, MessageText, Timestamp, UserName};
