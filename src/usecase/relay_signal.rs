//! UseCase: relay a signaling payload to the other participant of a room.
//!
//! The payload is forwarded verbatim, tagged with the sender's identity for
//! UI attribution. A missing peer is an expected race (it just disconnected
//! or the sender's connection went stale), so the message is dropped
//! silently rather than reported as an error.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    CallStatus, ConnectionId, MessagePushError, MessagePusher, Participant, RoomId, RoomRegistry,
};
use crate::infrastructure::dto::websocket::ServerEvent;

/// Validated signaling payload, converted from the wire event by the handler
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPayload {
    Offer { sdp: Value },
    Answer { sdp: Value },
    IceCandidate { candidate: Value },
}

/// What happened to a relayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Delivered to the peer's connection
    Relayed,
    /// No reachable peer; the message was discarded as a no-op
    Dropped,
}

/// Relays offers, answers and ICE candidates between the two participants
pub struct RelaySignalUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Relay `payload` from `connection_id` to the other participant of
    /// `room_id`.
    ///
    /// Call status advances on relayed offers (`connecting`) and answers
    /// (`active`); ICE candidates never change status. Relays from a
    /// connection that is no longer a room member are dropped: after a
    /// reconnect the stale connection must not reach the new peer.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        payload: SignalPayload,
    ) -> RelayOutcome {
        let Some(room) = self.registry.get(&room_id).await else {
            tracing::debug!("Dropping signal for unknown room '{}'", room_id);
            return RelayOutcome::Dropped;
        };

        let Some(sender) = room.participant_by_connection(connection_id) else {
            tracing::debug!(
                "Dropping signal from stale connection '{}' in room '{}'",
                connection_id,
                room_id
            );
            return RelayOutcome::Dropped;
        };

        let Some(peer) = room.peer_of(connection_id) else {
            tracing::debug!(
                "Dropping signal from '{}' in room '{}': no peer present",
                sender.participant_id,
                room_id
            );
            return RelayOutcome::Dropped;
        };

        let next_status = match &payload {
            SignalPayload::Offer { .. } => Some(CallStatus::Connecting),
            SignalPayload::Answer { .. } => Some(CallStatus::Active),
            SignalPayload::IceCandidate { .. } => None,
        };

        let event = build_event(sender, payload);
        let json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize relayed event: {}", e);
                return RelayOutcome::Dropped;
            }
        };

        match self.message_pusher.push_to(peer.connection_id, &json).await {
            Ok(()) => {}
            Err(MessagePushError::ConnectionNotFound(_)) => {
                // Peer unregistered between lookup and push: expected race.
                tracing::debug!(
                    "Peer of '{}' left before relay in room '{}'",
                    sender.participant_id,
                    room_id
                );
                return RelayOutcome::Dropped;
            }
            Err(e) => {
                tracing::warn!("Relay push failed in room '{}': {}", room_id, e);
                return RelayOutcome::Dropped;
            }
        }

        if let Some(status) = next_status {
            if let Err(e) = self.registry.set_status(&room_id, status).await {
                // Redundant redeliveries make this a legal no-op.
                tracing::debug!("Status update skipped for room '{}': {}", room_id, e);
            }
        }

        RelayOutcome::Relayed
    }
}

fn build_event(sender: &Participant, payload: SignalPayload) -> ServerEvent {
    let from_participant_id = sender.participant_id.as_str().to_string();
    match payload {
        SignalPayload::Offer { sdp } => ServerEvent::Offer {
            sdp,
            from_participant_id,
            from_display_name: sender.display_name.as_str().to_string(),
        },
        SignalPayload::Answer { sdp } => ServerEvent::Answer {
            sdp,
            from_participant_id,
            from_display_name: sender.display_name.as_str().to_string(),
        },
        SignalPayload::IceCandidate { candidate } => ServerEvent::IceCandidate {
            candidate,
            from_participant_id,
        },
    }
}
