//! Infrastructure layer: concrete implementations of the domain traits and
//! the wire-level DTOs.

pub mod dto;
pub mod id_generator;
pub mod registry;
