//! UseCase: fetch one room's full state for the operational API.

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRegistry};

pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Option<Room> {
        self.registry.get(room_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{
        ConnectionId, DisplayName, Participant, ParticipantId, Role, Timestamp,
    };
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    #[tokio::test]
    async fn test_returns_room_when_present_and_none_otherwise() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Box::new(FixedClock::new(1_000))));
        let usecase = GetRoomDetailUseCase::new(registry.clone());
        let room_id = RoomId::for_appointment("apt-1").unwrap();
        registry
            .join(
                room_id.clone(),
                Participant {
                    connection_id: ConnectionId::generate(),
                    participant_id: ParticipantId::new("dr".to_string()).unwrap(),
                    display_name: DisplayName::new("Dr".to_string()),
                    role: Role::Doctor,
                    joined_at: Timestamp::new(1),
                },
            )
            .await
            .unwrap();

        // when / then:
        let room = usecase.execute(&room_id).await.unwrap();
        assert_eq!(room.participants.len(), 1);
        let missing = RoomId::for_appointment("apt-2").unwrap();
        assert!(usecase.execute(&missing).await.is_none());
    }
}
