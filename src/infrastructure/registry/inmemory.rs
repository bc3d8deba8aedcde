//! In-memory room registry.
//!
//! Implements the domain's `RoomRegistry` trait with a `HashMap` behind a
//! single async mutex. Every operation takes the lock once and releases it
//! before returning, so the join/leave/get/set_status sequences are strictly
//! serialized: two simultaneous joins on an empty room cannot both become
//! "first participant", and an emptied room is deleted in the same critical
//! section that removed its last member.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::time::Clock;
use crate::domain::{
    CallStatus, ConnectionId, JoinOutcome, LeaveOutcome, Participant, RegistryError, Room,
    RoomId, RoomRegistry, Timestamp,
};

#[derive(Default)]
struct RegistryInner {
    rooms: HashMap<RoomId, Room>,
    /// Reverse index: which room each live connection belongs to
    connections: HashMap<ConnectionId, RoomId>,
}

/// In-memory `RoomRegistry` implementation
pub struct InMemoryRoomRegistry {
    inner: Mutex<RegistryInner>,
    clock: Box<dyn Clock>,
}

impl InMemoryRoomRegistry {
    /// Create an empty registry using the given clock for `created_at`
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
            clock,
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<JoinOutcome, RegistryError> {
        let mut inner = self.inner.lock().await;

        let created_at = Timestamp::new(self.clock.now_millis());
        let room = inner
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), created_at));

        let connection_id = participant.connection_id;
        let outcome = room.upsert_participant(participant)?;

        if let Some(stale) = outcome.replaced_connection {
            inner.connections.remove(&stale);
        }
        inner.connections.insert(connection_id, room_id);

        Ok(JoinOutcome {
            other: outcome.other,
            replaced_connection: outcome.replaced_connection,
        })
    }

    async fn leave(&self, room_id: &RoomId, connection_id: ConnectionId) -> LeaveOutcome {
        let mut inner = self.inner.lock().await;

        let Some(room) = inner.rooms.get_mut(room_id) else {
            return LeaveOutcome {
                departed: None,
                remaining: None,
                room_removed: false,
            };
        };

        let departed = room.remove_by_connection(connection_id);
        if departed.is_some() {
            inner.connections.remove(&connection_id);
        }

        let remaining = inner
            .rooms
            .get(room_id)
            .and_then(|room| room.participants.first().cloned());

        // A room with zero participants must not survive this call.
        let room_removed = inner
            .rooms
            .get(room_id)
            .is_some_and(|room| room.is_empty());
        if room_removed {
            inner.rooms.remove(room_id);
        }

        LeaveOutcome {
            departed,
            remaining,
            room_removed,
        }
    }

    async fn room_of(&self, connection_id: ConnectionId) -> Option<RoomId> {
        let inner = self.inner.lock().await;
        inner.connections.get(&connection_id).cloned()
    }

    async fn get(&self, room_id: &RoomId) -> Option<Room> {
        let inner = self.inner.lock().await;
        inner.rooms.get(room_id).cloned()
    }

    async fn set_status(&self, room_id: &RoomId, status: CallStatus) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock().await;
        let room = inner
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.set_status(status)
    }

    async fn remove_room(&self, room_id: &RoomId) -> Option<Room> {
        let mut inner = self.inner.lock().await;
        let room = inner.rooms.remove(room_id)?;
        for participant in &room.participants {
            inner.connections.remove(&participant.connection_id);
        }
        Some(room)
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let inner = self.inner.lock().await;
        let mut rooms: Vec<Room> = inner.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }
}
