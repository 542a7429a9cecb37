//! UseCases backing the HTTP inspection API.

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRegistry};

use super::error::GetRoomDetailError;

/// List every registered room.
pub struct ListRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ListRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<Room> {
        self.registry.list_rooms().await
    }
}

/// Fetch one room by identifier.
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomDetailError> {
        self.registry
            .get_room(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use codepair_shared::time::FixedClock;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_list_rooms_returns_all() {
        // Test: every registered room appears in the listing
        // given:
        let registry = Arc::new(
            crate::infrastructure::registry::InMemoryRoomRegistry::new(Arc::new(FixedClock::new(
                1000,
            ))),
        );
        registry.get_or_create(&room("r1")).await;
        registry.get_or_create(&room("r2")).await;
        let usecase = ListRoomsUseCase::new(registry);

        // when:
        let rooms = usecase.execute().await;

        // then:
        assert_eq!(rooms.len(), 2);
    }

    #[tokio::test]
    async fn test_get_room_detail_unknown_room_is_not_found() {
        // Test: an unknown identifier resolves to RoomNotFound
        // given:
        let registry = Arc::new(
            crate::infrastructure::registry::InMemoryRoomRegistry::new(Arc::new(FixedClock::new(
                1000,
            ))),
        );
        let usecase = GetRoomDetailUseCase::new(registry);

        // when:
        let result = usecase.execute(&room("ghost")).await;

        // then:
        assert_eq!(result, Err(GetRoomDetailError::RoomNotFound));
    }
}
