//! UseCase: end a call deliberately and tear down the room.
//!
//! Unlike a disconnect, both WebSocket connections stay open. The room is
//! removed as a whole so both identities are released at once; either side
//! may start a fresh session for the same appointment afterwards.

use std::sync::Arc;

use crate::domain::{
    CallStatus, ConnectionId, MessagePushError, MessagePusher, RoomId, RoomRegistry,
};
use crate::infrastructure::dto::websocket::ServerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndCallOutcome {
    /// Whether a peer was present and received `call-ended`
    pub peer_notified: bool,
}

/// Ends calls on request of a room member
pub struct EndCallUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EndCallUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// End the call in `room_id` on behalf of `connection_id`.
    ///
    /// Only a current member may end a call; requests from stale or foreign
    /// connections are ignored. Ending an already removed room is a no-op,
    /// which makes crossing `end-call` requests from both sides safe.
    pub async fn execute(&self, connection_id: ConnectionId, room_id: RoomId) -> EndCallOutcome {
        let Some(room) = self.registry.get(&room_id).await else {
            tracing::debug!("Ignoring end-call for unknown room '{}'", room_id);
            return EndCallOutcome { peer_notified: false };
        };

        let Some(ender) = room.participant_by_connection(connection_id) else {
            tracing::debug!(
                "Ignoring end-call from non-member connection '{}' in room '{}'",
                connection_id,
                room_id
            );
            return EndCallOutcome { peer_notified: false };
        };
        let ender_id = ender.participant_id.clone();

        if let Err(e) = self.registry.set_status(&room_id, CallStatus::Ended).await {
            tracing::debug!("Status update skipped for room '{}': {}", room_id, e);
        }

        let removed = self.registry.remove_room(&room_id).await;
        tracing::info!("Call in room '{}' ended by '{}'", room_id, ender_id);

        let peer = removed
            .as_ref()
            .and_then(|room| room.peer_of(connection_id).cloned());
        let Some(peer) = peer else {
            return EndCallOutcome { peer_notified: false };
        };

        let json = match serde_json::to_string(&ServerEvent::CallEnded) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize call-ended event: {}", e);
                return EndCallOutcome { peer_notified: false };
            }
        };
        match self.message_pusher.push_to(peer.connection_id, &json).await {
            Ok(()) => EndCallOutcome { peer_notified: true },
            Err(MessagePushError::ConnectionNotFound(_)) => {
                tracing::debug!(
                    "Peer '{}' already gone when call in room '{}' ended",
                    peer.participant_id,
                    room_id
                );
                EndCallOutcome { peer_notified: false }
            }
            Err(e) => {
                tracing::warn!("Failed to deliver call-ended in room '{}': {}", room_id, e);
                EndCallOutcome { peer_notified: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{DisplayName, Participant, ParticipantId, Role, Timestamp};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn room_id() -> RoomId {
        RoomId::for_appointment("apt-1").unwrap()
    }

    fn participant(id: &str, role: Role) -> Participant {
        Participant {
            connection_id: ConnectionId::generate(),
            participant_id: ParticipantId::new(id.to_string()).unwrap(),
            display_name: DisplayName::new(id.to_uppercase()),
            role,
            joined_at: Timestamp::new(1),
        }
    }

    struct Fixture {
        registry: Arc<InMemoryRoomRegistry>,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: EndCallUseCase,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(InMemoryRoomRegistry::new(Box::new(FixedClock::new(1_000))));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = EndCallUseCase::new(registry.clone(), pusher.clone());
        Fixture {
            registry,
            pusher,
            usecase,
        }
    }

    impl Fixture {
        async fn connect(&self, participant: &Participant) -> UnboundedReceiver<String> {
            let (tx, rx) = mpsc::unbounded_channel();
            self.pusher.register_connection(participant.connection_id, tx).await;
            rx
        }
    }

    #[tokio::test]
    async fn test_end_call_removes_room_and_notifies_peer() {
        // given: an active two-party call
        let f = fixture();
        let doctor = participant("dr", Role::Doctor);
        let patient = participant("pat", Role::Patient);
        let _doctor_rx = f.connect(&doctor).await;
        let mut patient_rx = f.connect(&patient).await;
        f.registry.join(room_id(), doctor.clone()).await.unwrap();
        f.registry.join(room_id(), patient.clone()).await.unwrap();

        // when: the doctor hangs up
        let outcome = f.usecase.execute(doctor.connection_id, room_id()).await;

        // then: peer notified, room gone, both memberships released
        assert!(outcome.peer_notified);
        let raw = patient_rx.try_recv().unwrap();
        let event: ServerEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(event, ServerEvent::CallEnded);
        assert!(f.registry.get(&room_id()).await.is_none());
        assert!(f.registry.room_of(doctor.connection_id).await.is_none());
        assert!(f.registry.room_of(patient.connection_id).await.is_none());
    }

    #[tokio::test]
    async fn test_end_call_alone_removes_room_silently() {
        // given: a waiting room with one occupant
        let f = fixture();
        let doctor = participant("dr", Role::Doctor);
        let mut doctor_rx = f.connect(&doctor).await;
        f.registry.join(room_id(), doctor.clone()).await.unwrap();

        // when:
        let outcome = f.usecase.execute(doctor.connection_id, room_id()).await;

        // then:
        assert!(!outcome.peer_notified);
        assert!(f.registry.get(&room_id()).await.is_none());
        assert!(doctor_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_end_call_from_non_member_is_ignored() {
        // given:
        let f = fixture();
        let doctor = participant("dr", Role::Doctor);
        let _doctor_rx = f.connect(&doctor).await;
        f.registry.join(room_id(), doctor.clone()).await.unwrap();

        // when: a connection outside the room tries to end the call
        let outcome = f.usecase.execute(ConnectionId::generate(), room_id()).await;

        // then: room untouched
        assert!(!outcome.peer_notified);
        assert!(f.registry.get(&room_id()).await.is_some());
    }

    #[tokio::test]
    async fn test_crossing_end_calls_are_safe() {
        // given: both sides hang up at once
        let f = fixture();
        let doctor = participant("dr", Role::Doctor);
        let patient = participant("pat", Role::Patient);
        let _doctor_rx = f.connect(&doctor).await;
        let _patient_rx = f.connect(&patient).await;
        f.registry.join(room_id(), doctor.clone()).await.unwrap();
        f.registry.join(room_id(), patient.clone()).await.unwrap();

        // when: the second request lands after the room is gone
        let first = f.usecase.execute(doctor.connection_id, room_id()).await;
        let second = f.usecase.execute(patient.connection_id, room_id()).await;

        // then:
        assert!(first.peer_notified);
        assert!(!second.peer_notified);
        assert!(f.registry.get(&room_id()).await.is_none());
    }

    #[tokio::test]
    async fn test_room_can_be_recreated_after_end_call() {
        // given: an ended call
        let f = fixture();
        let doctor = participant("dr", Role::Doctor);
        let _doctor_rx = f.connect(&doctor).await;
        f.registry.join(room_id(), doctor.clone()).await.unwrap();
        f.usecase.execute(doctor.connection_id, room_id()).await;

        // when: the same identity joins again on a new connection
        let doctor_again = participant("dr", Role::Doctor);
        let outcome = f.registry.join(room_id(), doctor_again).await.unwrap();

        // then: a fresh waiting room, no replacement bookkeeping
        assert!(outcome.replaced_connection.is_none());
        let room = f.registry.get(&room_id()).await.unwrap();
        assert_eq!(room.call_status, CallStatus::Waiting);
    }
}
