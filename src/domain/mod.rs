//! Domain layer: room membership model, call state machine and the
//! interfaces the coordinator depends on.
//!
//! Nothing in this module performs I/O. The registry and pusher traits are
//! implemented by the infrastructure layer (dependency inversion).

mod error;
mod ids;
mod pusher;
mod registry;
mod room;

pub use error::{DomainError, MessagePushError, RegistryError};
pub use ids::{ConnectionId, DisplayName, ParticipantId, RoomId, Timestamp};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{JoinOutcome, LeaveOutcome, RoomRegistry};
pub use room::{CallStatus, Participant, Role, Room, UpsertOutcome, select_initiator};

#[cfg(test)]
pub use pusher::MockMessagePusher;
