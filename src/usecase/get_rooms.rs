//! UseCase: list all live rooms for the operational API.

use std::sync::Arc;

use crate::domain::{Room, RoomRegistry};

pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of every room, ordered by room id
    pub async fn execute(&self) -> Vec<Room> {
        self.registry.list_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{
        ConnectionId, DisplayName, Participant, ParticipantId, Role, RoomId, Timestamp,
    };
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    fn participant(id: &str) -> Participant {
        Participant {
            connection_id: ConnectionId::generate(),
            participant_id: ParticipantId::new(id.to_string()).unwrap(),
            display_name: DisplayName::new(id.to_string()),
            role: Role::Patient,
            joined_at: Timestamp::new(1),
        }
    }

    #[tokio::test]
    async fn test_lists_rooms_in_id_order() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Box::new(FixedClock::new(1_000))));
        let usecase = GetRoomsUseCase::new(registry.clone());
        registry
            .join(RoomId::for_appointment("b").unwrap(), participant("p1"))
            .await
            .unwrap();
        registry
            .join(RoomId::for_appointment("a").unwrap(), participant("p2"))
            .await
            .unwrap();

        // when:
        let rooms = usecase.execute().await;

        // then:
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id.as_str(), "consult-a");
        assert_eq!(rooms[1].id.as_str(), "consult-b");
    }

    #[tokio::test]
    async fn test_empty_registry_lists_nothing() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Box::new(FixedClock::new(1_000))));
        let usecase = GetRoomsUseCase::new(registry);

        // when / then:
        assert!(usecase.execute().await.is_empty());
    }
}
