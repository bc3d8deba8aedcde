//! Room registry trait definition.
//!
//! The registry is the single source of truth for room membership and call
//! status. The usecase layer depends on this trait, not on the in-memory
//! implementation the infrastructure layer provides (dependency inversion).

use async_trait::async_trait;

use super::error::RegistryError;
use super::ids::{ConnectionId, RoomId};
use super::room::{CallStatus, Participant, Room};

/// Result of a successful [`RoomRegistry::join`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The other occupant of the room, present when this was the second join
    pub other: Option<Participant>,
    /// The stale connection retired because the same identity rejoined
    pub replaced_connection: Option<ConnectionId>,
}

/// Result of a [`RoomRegistry::leave`].
///
/// A leave for an absent connection is a no-op, not an error: disconnects
/// race with explicit leaves and the second event must be harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// The participant that was removed, `None` if already absent
    pub departed: Option<Participant>,
    /// The participant still in the room afterwards, if any
    pub remaining: Option<Participant>,
    /// Whether the room reached zero participants and was deleted
    pub room_removed: bool,
}

/// Single source of truth for room membership and call status.
///
/// Implementations must make each operation atomic: a room with zero
/// participants is deleted inside the same `leave` call that emptied it and
/// is never observable through `get`.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Register a participant in a room, creating the room on first join.
    ///
    /// A rejoin by the same `participant_id` replaces its stale entry; two
    /// distinct identities already present fail with
    /// [`RegistryError::RoomFull`].
    async fn join(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<JoinOutcome, RegistryError>;

    /// Remove the participant holding `connection_id` from a room, deleting
    /// the room atomically when it becomes empty
    async fn leave(&self, room_id: &RoomId, connection_id: ConnectionId) -> LeaveOutcome;

    /// The room a live connection is currently part of (at most one)
    async fn room_of(&self, connection_id: ConnectionId) -> Option<RoomId>;

    /// Snapshot of a room
    async fn get(&self, room_id: &RoomId) -> Option<Room>;

    /// Apply a call status transition, validated against the state machine
    async fn set_status(&self, room_id: &RoomId, status: CallStatus) -> Result<(), RegistryError>;

    /// Delete a room outright (end-call teardown), returning its last state
    async fn remove_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Snapshot of all live rooms
    async fn list_rooms(&self) -> Vec<Room>;
}
