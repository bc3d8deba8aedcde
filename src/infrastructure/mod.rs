//! Infrastructure layer: concrete implementations of the domain's registry
//! and pusher traits, plus the wire/HTTP DTOs.

pub mod dto;
pub mod message_pusher;
pub mod registry;
