//! Domain model to DTO conversion.

use crate::common::time::timestamp_to_rfc3339;
use crate::domain::{CallStatus, Participant, Room};

use super::http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto};
use super::websocket::ServerEvent;

fn status_label(status: CallStatus) -> &'static str {
    match status {
        CallStatus::Waiting => "waiting",
        CallStatus::Offered => "offered",
        CallStatus::Connecting => "connecting",
        CallStatus::Active => "active",
        CallStatus::Ended => "ended",
    }
}

impl ServerEvent {
    /// `user-joined` notification describing the new arrival
    pub fn user_joined(participant: &Participant) -> Self {
        ServerEvent::UserJoined {
            participant_id: participant.participant_id.as_str().to_string(),
            display_name: participant.display_name.as_str().to_string(),
            role: participant.role,
        }
    }

    /// `peer-joined` notification describing the peer already in the room
    pub fn peer_joined(peer: &Participant) -> Self {
        ServerEvent::PeerJoined {
            participant_id: peer.participant_id.as_str().to_string(),
            display_name: peer.display_name.as_str().to_string(),
            role: peer.role,
        }
    }

    /// `you-initiate` notification carrying the peer's identity
    pub fn you_initiate(peer: &Participant) -> Self {
        ServerEvent::YouInitiate {
            participant_id: peer.participant_id.as_str().to_string(),
            display_name: peer.display_name.as_str().to_string(),
            role: peer.role,
        }
    }

    /// `user-left` notification for a departed participant
    pub fn user_left(participant: &Participant) -> Self {
        ServerEvent::UserLeft {
            participant_id: participant.participant_id.as_str().to_string(),
            display_name: participant.display_name.as_str().to_string(),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            call_status: status_label(room.call_status).to_string(),
            participants: room
                .participants
                .iter()
                .map(|p| p.participant_id.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            call_status: status_label(room.call_status).to_string(),
            participants: room.participants.iter().map(Into::into).collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Participant> for ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        Self {
            participant_id: participant.participant_id.as_str().to_string(),
            display_name: participant.display_name.as_str().to_string(),
            role: participant.role,
            joined_at: timestamp_to_rfc3339(participant.joined_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DisplayName, ParticipantId, Role, RoomId, Timestamp};

    fn sample_room() -> Room {
        let mut room = Room::new(
            RoomId::for_appointment("apt-9").unwrap(),
            Timestamp::new(1672531200000),
        );
        room.upsert_participant(Participant {
            connection_id: ConnectionId::generate(),
            participant_id: ParticipantId::new("dr-1".to_string()).unwrap(),
            display_name: DisplayName::new("Dr. Ada".to_string()),
            role: Role::Doctor,
            joined_at: Timestamp::new(1672531201000),
        })
        .unwrap();
        room
    }

    #[test]
    fn test_room_summary_from_domain() {
        // given:
        let room = sample_room();

        // when:
        let dto = RoomSummaryDto::from(&room);

        // then:
        assert_eq!(dto.id, "consult-apt-9");
        assert_eq!(dto.call_status, "waiting");
        assert_eq!(dto.participants, vec!["dr-1".to_string()]);
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_room_detail_includes_participant_identity() {
        // given:
        let room = sample_room();

        // when:
        let dto = RoomDetailDto::from(&room);

        // then:
        assert_eq!(dto.participants.len(), 1);
        let p = &dto.participants[0];
        assert_eq!(p.participant_id, "dr-1");
        assert_eq!(p.display_name, "Dr. Ada");
        assert_eq!(p.role, Role::Doctor);
    }

    #[test]
    fn test_server_event_constructors_carry_attribution() {
        // given:
        let room = sample_room();
        let doctor = &room.participants[0];

        // when / then:
        assert_eq!(
            ServerEvent::user_joined(doctor),
            ServerEvent::UserJoined {
                participant_id: "dr-1".to_string(),
                display_name: "Dr. Ada".to_string(),
                role: Role::Doctor,
            }
        );
        assert_eq!(
            ServerEvent::user_left(doctor),
            ServerEvent::UserLeft {
                participant_id: "dr-1".to_string(),
                display_name: "Dr. Ada".to_string(),
            }
        );
    }
}
