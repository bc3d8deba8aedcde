//! Signaling events exchanged over the WebSocket.
//!
//! Events are tagged unions (`type` field, kebab-case tags, camelCase
//! fields) so the browser clients keep their existing vocabulary. SDP and
//! ICE payloads are opaque [`serde_json::Value`]s: the server validates the
//! envelope at the boundary and relays the payload verbatim, never
//! inspecting its contents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Role;

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Associate this connection with an appointment room
    JoinRoom {
        room_id: String,
        participant_id: String,
        display_name: String,
        role: Role,
    },
    /// SDP offer to relay to the peer
    Offer { room_id: String, sdp: Value },
    /// SDP answer to relay back to the initiator
    Answer { room_id: String, sdp: Value },
    /// ICE candidate to relay to the peer
    IceCandidate { room_id: String, candidate: Value },
    /// Hang up; the peer is notified and the room is torn down
    EndCall { room_id: String },
}

/// Machine-readable error codes surfaced to a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    RoomFull,
    MalformedMessage,
}

/// Events pushed from the server to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// A peer joined the room (sent to the participant already present)
    UserJoined {
        participant_id: String,
        display_name: String,
        role: Role,
    },
    /// Joined a room that already had a peer; wait for its offer
    PeerJoined {
        participant_id: String,
        display_name: String,
        role: Role,
    },
    /// This side was designated the initiator and must send the offer
    YouInitiate {
        participant_id: String,
        display_name: String,
        role: Role,
    },
    /// Relayed SDP offer, tagged with the sender for UI attribution
    Offer {
        sdp: Value,
        from_participant_id: String,
        from_display_name: String,
    },
    /// Relayed SDP answer
    Answer {
        sdp: Value,
        from_participant_id: String,
        from_display_name: String,
    },
    /// Relayed ICE candidate
    IceCandidate {
        candidate: Value,
        from_participant_id: String,
    },
    /// The peer ended the call
    CallEnded,
    /// The peer left or disconnected
    UserLeft {
        participant_id: String,
        display_name: String,
    },
    /// Request-scoped error, sent only to the offending connection
    Error { code: ErrorCode, message: String },
}
