//! Presence notifier.
//!
//! The member count is a view over the registry's member set, recomputed on
//! every membership change and never stored on its own. The count is pushed
//! to every member of the room, the subject of the change included.

use std::sync::Arc;

use crate::domain::{EventPushError, EventPusher, RoomId, RoomRegistry};

pub struct PresenceNotifier {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl PresenceNotifier {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Read the room's current member count from the registry.
    pub async fn current_count(&self, room_id: &RoomId) -> usize {
        self.registry.member_count(room_id).await
    }

    /// Push the serialized `participants-update` event to every member of
    /// the room.
    pub async fn broadcast_count(
        &self,
        room_id: &RoomId,
        message: &str,
    ) -> Result<(), EventPushError> {
        let targets = self.registry.members(room_id).await;
        self.pusher.broadcast(targets, message).await
    }
}
