//! Room membership model and call status state machine.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use super::ids::{ConnectionId, DisplayName, ParticipantId, RoomId, Timestamp};

/// A room never holds more than two participants (one doctor, one patient)
pub const ROOM_CAPACITY: usize = 2;

/// Role of a participant in the consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

/// One end of a call: a stable identity plus its current live connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Transient transport connection, replaced on reconnect
    pub connection_id: ConnectionId,
    /// Stable identity from the surrounding session
    pub participant_id: ParticipantId,
    pub display_name: DisplayName,
    pub role: Role,
    /// Used for diagnostics and for the initiator tie-break
    pub joined_at: Timestamp,
}

/// Coarse per-room call status.
///
/// The `empty` state of the call lifecycle is represented by the room not
/// existing in the registry at all; a stored room always has at least one
/// participant.
///
/// Transitions:
///
/// ```text
/// waiting -> offered -> connecting -> active
/// offered | connecting | active -> waiting   (peer left, one side remains)
/// any -> ended                               (explicit end-call or teardown)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Exactly one participant present
    Waiting,
    /// Both present, initiator has been designated and notified
    Offered,
    /// An SDP offer has been relayed
    Connecting,
    /// The matching answer has been relayed back to the initiator
    Active,
    /// Call finished; the room is removed right after entering this state
    Ended,
}

impl CallStatus {
    /// Whether `self -> next` is a legal state machine transition
    pub fn can_transition_to(self, next: CallStatus) -> bool {
        use CallStatus::*;
        matches!(
            (self, next),
            (Waiting, Offered)
                | (Offered, Connecting)
                | (Connecting, Active)
                | (Offered, Waiting)
                | (Connecting, Waiting)
                | (Active, Waiting)
                | (Waiting, Ended)
                | (Offered, Ended)
                | (Connecting, Ended)
                | (Active, Ended)
        )
    }
}

/// Result of [`Room::upsert_participant`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The other occupant of the room, if any
    pub other: Option<Participant>,
    /// The stale connection retired by a reconnect of the same identity
    pub replaced_connection: Option<ConnectionId>,
}

/// The signaling-session context for one appointment.
///
/// Owned exclusively by the registry; the coordinator only ever sees clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<Participant>,
    pub call_status: CallStatus,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a room in `waiting` state with no participants yet.
    ///
    /// The registry inserts the first participant in the same critical
    /// section, so an empty room is never observable.
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            participants: Vec::with_capacity(ROOM_CAPACITY),
            call_status: CallStatus::Waiting,
            created_at,
        }
    }

    /// Add a participant, or replace the stale entry when the same identity
    /// rejoins with a fresh connection.
    ///
    /// Fails with [`RegistryError::RoomFull`] when two distinct identities
    /// are already present.
    pub fn upsert_participant(
        &mut self,
        participant: Participant,
    ) -> Result<UpsertOutcome, RegistryError> {
        if let Some(pos) = self
            .participants
            .iter()
            .position(|p| p.participant_id == participant.participant_id)
        {
            // Reconnect: same identity, new connection. The old connection
            // is dead from this point on.
            let replaced = self.participants[pos].connection_id;
            let identity = participant.participant_id.clone();
            self.participants[pos] = participant;
            let other = self
                .participants
                .iter()
                .find(|p| p.participant_id != identity)
                .cloned();
            return Ok(UpsertOutcome {
                other,
                replaced_connection: Some(replaced),
            });
        }

        if self.participants.len() >= ROOM_CAPACITY {
            return Err(RegistryError::RoomFull {
                room_id: self.id.as_str().to_string(),
            });
        }

        let other = self.participants.first().cloned();
        self.participants.push(participant);
        Ok(UpsertOutcome {
            other,
            replaced_connection: None,
        })
    }

    /// Remove the participant holding `connection_id`, returning it.
    ///
    /// Returns `None` when no participant holds that connection (already
    /// left, or the connection was retired by a reconnect).
    pub fn remove_by_connection(&mut self, connection_id: ConnectionId) -> Option<Participant> {
        let pos = self
            .participants
            .iter()
            .position(|p| p.connection_id == connection_id)?;
        Some(self.participants.remove(pos))
    }

    /// The participant holding `connection_id`, if it is in this room
    pub fn participant_by_connection(&self, connection_id: ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.connection_id == connection_id)
    }

    /// The other participant relative to `connection_id`.
    ///
    /// `None` when the sender is alone in the room or its connection is no
    /// longer a member (both expected races, not faults).
    pub fn peer_of(&self, connection_id: ConnectionId) -> Option<&Participant> {
        let sender = self.participant_by_connection(connection_id)?;
        self.participants
            .iter()
            .find(|p| p.participant_id != sender.participant_id)
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Apply a status transition, validating it against the state machine
    pub fn set_status(&mut self, next: CallStatus) -> Result<(), RegistryError> {
        if !self.call_status.can_transition_to(next) {
            return Err(RegistryError::InvalidTransition {
                from: self.call_status,
                to: next,
            });
        }
        self.call_status = next;
        Ok(())
    }
}

/// Pick the participant that must send the SDP offer.
///
/// Policy: the doctor initiates. If both sides somehow share a role, the
/// earlier `joined_at` wins, with `participant_id` ordering as the final
/// tie-break so the choice is total and reproducible. Both ends must agree
/// on the initiator without a negotiation round-trip, which is why the rule
/// is a pure function of the two (role, joined_at, id) triples.
pub fn select_initiator<'a>(a: &'a Participant, b: &'a Participant) -> &'a Participant {
    match (a.role, b.role) {
        (Role::Doctor, Role::Patient) => a,
        (Role::Patient, Role::Doctor) => b,
        _ => match a.joined_at.cmp(&b.joined_at) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal => {
                if a.participant_id <= b.participant_id {
                    a
                } else {
                    b
                }
            }
        },
    }
}
