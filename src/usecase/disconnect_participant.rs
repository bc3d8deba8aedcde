//! UseCase: clean up after a closed WebSocket connection.
//!
//! Runs for every connection teardown, whether the client left cleanly or
//! the socket dropped. A stale connection that was already replaced by a
//! reconnect cleans up nothing but its own push channel.

use std::sync::Arc;

use crate::domain::{CallStatus, ConnectionId, MessagePusher, RoomRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// Whether the departure emptied the room and removed it
    pub room_removed: bool,
    /// Whether a remaining peer received `user-left`
    pub peer_notified: bool,
}

/// Removes departed connections from their room and notifies the remainder
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Handle the teardown of `connection_id`.
    ///
    /// The push channel is always unregistered, even when the connection no
    /// longer maps to a room. When a peer remains, the room reverts to
    /// `waiting` so a rejoin restarts the offer sequence.
    pub async fn execute(&self, connection_id: ConnectionId) -> DisconnectOutcome {
        self.message_pusher.unregister_connection(connection_id).await;

        let Some(room_id) = self.registry.room_of(connection_id).await else {
            tracing::debug!("Connection '{}' closed outside any room", connection_id);
            return DisconnectOutcome {
                room_removed: false,
                peer_notified: false,
            };
        };

        let outcome = self.registry.leave(&room_id, connection_id).await;

        if outcome.room_removed {
            tracing::info!("Room '{}' emptied and removed", room_id);
        }

        let (Some(departed), Some(remaining)) = (outcome.departed, outcome.remaining) else {
            return DisconnectOutcome {
                room_removed: outcome.room_removed,
                peer_notified: false,
            };
        };

        tracing::info!(
            "Participant '{}' left room '{}'; '{}' remains",
            departed.participant_id,
            room_id,
            remaining.participant_id
        );

        if let Err(e) = self.registry.set_status(&room_id, CallStatus::Waiting).await {
            tracing::debug!("Status update skipped for room '{}': {}", room_id, e);
        }

        let peer_notified = match serde_json::to_string(&ServerEvent::user_left(&departed)) {
            Ok(json) => match self.message_pusher.push_to(remaining.connection_id, &json).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(
                        "Could not notify '{}' of departure in room '{}': {}",
                        remaining.participant_id,
                        room_id,
                        e
                    );
                    false
                }
            },
            Err(e) => {
                tracing::error!("Failed to serialize user-left event: {}", e);
                false
            }
        };

        DisconnectOutcome {
            room_removed: false,
            peer_notified,
        }
    }
}
