//! UseCase: join a participant into an appointment room.
//!
//! First join creates the room in `waiting`. The second distinct identity
//! moves the room to `offered`, designates the initiator and notifies both
//! sides. A rejoin by the same identity replaces its stale connection.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    CallStatus, ConnectionId, DisplayName, MessagePusher, Participant, ParticipantId,
    RegistryError, Role, RoomId, RoomRegistry, Timestamp, select_initiator,
};
use crate::infrastructure::dto::websocket::ServerEvent;

/// Validated join request, converted from the wire event by the handler
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub room_id: RoomId,
    pub participant_id: ParticipantId,
    pub display_name: DisplayName,
    pub role: Role,
}

/// Joins participants into rooms and runs the initiation policy
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// Execute a join for `connection_id`.
    ///
    /// On `RoomFull` the caller reports the error to the joining connection
    /// only; the room and its occupants are left untouched.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        request: JoinRequest,
    ) -> Result<(), RegistryError> {
        let participant = Participant {
            connection_id,
            participant_id: request.participant_id,
            display_name: request.display_name,
            role: request.role,
            joined_at: Timestamp::new(self.clock.now_millis()),
        };

        let outcome = self
            .registry
            .join(request.room_id.clone(), participant.clone())
            .await?;

        if let Some(stale) = outcome.replaced_connection {
            // The replaced connection is dead: drop its push channel so any
            // relay still addressed to it is treated as peer-unavailable.
            tracing::info!(
                "Participant '{}' reconnected to room '{}', retiring connection '{}'",
                participant.participant_id,
                request.room_id,
                stale
            );
            self.message_pusher.unregister_connection(stale).await;
        }

        let Some(other) = outcome.other else {
            tracing::info!(
                "Participant '{}' is waiting alone in room '{}'",
                participant.participant_id,
                request.room_id
            );
            return Ok(());
        };

        // Both sides are present: designate the initiator. The transition is
        // a logged no-op when a reconnect lands on a room that is already
        // past `offered`; re-sending the initiator notification is harmless.
        if let Err(e) = self
            .registry
            .set_status(&request.room_id, CallStatus::Offered)
            .await
        {
            tracing::debug!("Status update skipped for room '{}': {}", request.room_id, e);
        }

        let initiator_is_joiner =
            select_initiator(&participant, &other).participant_id == participant.participant_id;

        // The occupant always learns about the arrival first.
        self.push(other.connection_id, &ServerEvent::user_joined(&participant))
            .await;

        if initiator_is_joiner {
            self.push(connection_id, &ServerEvent::you_initiate(&other))
                .await;
        } else {
            self.push(connection_id, &ServerEvent::peer_joined(&other))
                .await;
            self.push(other.connection_id, &ServerEvent::you_initiate(&participant))
                .await;
        }

        tracing::info!(
            "Room '{}' is offered; initiator is '{}'",
            request.room_id,
            if initiator_is_joiner {
                participant.participant_id.as_str()
            } else {
                other.participant_id.as_str()
            }
        );

        Ok(())
    }

    async fn push(&self, connection_id: ConnectionId, event: &ServerEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                return;
            }
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &json).await {
            tracing::warn!("Failed to notify connection '{}': {}", connection_id, e);
        }
    }
}
