//! In-memory room registry.
//!
//! A single `Mutex` over the whole room map serializes every membership and
//! document mutation, the same guarantee the original event loop gave: no two
//! handlers touch room state concurrently, and the document reflects
//! whichever write lands last at the registry. Rooms are ephemeral; nothing
//! is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use codepair_shared::time::Clock;

use crate::domain::{
    CodeText, ConnectionId, Participant, Room, RoomId, RoomRegistry, Timestamp,
};

pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomId, Room>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_utc_millis())
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn get_or_create(&self, room_id: &RoomId) -> Room {
        let mut rooms = self.rooms.lock().await;
        if !rooms.contains_key(room_id) {
            tracing::info!("Room '{}' created", room_id);
            rooms.insert(room_id.clone(), Room::new(room_id.clone(), self.now()));
        }
        rooms.get(room_id).cloned().expect("room inserted above")
    }

    async fn add_member(&self, room_id: &RoomId, participant: Participant) -> usize {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(room) => room.add_participant(participant),
            None => {
                tracing::debug!("add_member on unknown room '{}' ignored", room_id);
                0
            }
        }
    }

    async fn remove_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> usize {
        let now = self.now();
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(room) => room.remove_participant(connection_id, now),
            None => {
                tracing::debug!("remove_member on unknown room '{}' ignored", room_id);
                0
            }
        }
    }

    async fn set_document(&self, room_id: &RoomId, code: CodeText) {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(room) => room.set_document(code),
            None => tracing::debug!("set_document on unknown room '{}' ignored", room_id),
        }
    }

    async fn get_document(&self, room_id: &RoomId) -> Option<CodeText> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(|room| room.document().clone())
    }

    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }

    async fn member_count(&self, room_id: &RoomId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(|room| room.member_count()).unwrap_or(0)
    }

    async fn participants(&self, room_id: &RoomId) -> Vec<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.participants.clone())
            .unwrap_or_default()
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }

    async fn purge_empty(&self, idle_cutoff: Timestamp) -> Vec<RoomId> {
        let mut rooms = self.rooms.lock().await;
        let doomed: Vec<RoomId> = rooms
            .values()
            .filter(|room| {
                room.is_empty()
                    && room
                        .idle_since
                        .is_some_and(|idle| idle <= idle_cutoff)
            })
            .map(|room| room.id.clone())
            .collect();
        for room_id in &doomed {
            rooms.remove(room_id);
            tracing::debug!("Room '{}' purged from registry", room_id);
        }
        doomed
    }
}
