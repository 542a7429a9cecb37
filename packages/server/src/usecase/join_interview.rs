//! UseCase: entering an interview room.

use std::sync::Arc;

use crate::domain::{
    CodeText, ConnectionId, EventPushError, EventPusher, Participant, RoomId, RoomRegistry,
};

/// What the join produced: a snapshot the UI layer renders into the
/// `room-state` reply and the presence broadcast.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Every member after the join, the joiner included.
    pub participants: Vec<Participant>,
    /// The room's current document, so a late joiner observes the latest
    /// write.
    pub document: CodeText,
    pub participant_count: usize,
}

/// Joining a room: create it if unknown, add the member, and announce the
/// newcomer to the existing members.
pub struct JoinInterviewUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl JoinInterviewUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Register the participant in the room, creating the room on first
    /// reference. Adding a connection that is already a member changes
    /// nothing.
    pub async fn execute(&self, room_id: &RoomId, participant: Participant) -> JoinOutcome {
        // 1. Resolve or create the room.
        self.registry.get_or_create(room_id).await;

        // 2. Insert into the member set.
        let participant_count = self.registry.add_member(room_id, participant).await;

        // 3. Snapshot what the joiner needs to see.
        let participants = self.registry.participants(room_id).await;
        let document = self
            .registry
            .get_document(room_id)
            .await
            .unwrap_or_else(CodeText::empty);

        JoinOutcome {
            participants,
            document,
            participant_count,
        }
    }

    /// Announce the joiner to every other member of the room.
    ///
    /// # Arguments
    ///
    /// * `room_id` - The room that was joined
    /// * `joiner` - The connection to exclude from the fan-out
    /// * `message` - The serialized `user-joined` event
    pub async fn broadcast_user_joined(
        &self,
        room_id: &RoomId,
        joiner: &ConnectionId,
        message: &str,
    ) -> Result<(), EventPushError> {
        let targets: Vec<ConnectionId> = self
            .registry
            .members(room_id)
            .await
            .into_iter()
            .filter(|id| id != joiner)
            .collect();

        self.pusher.broadcast(targets, message).await
    }
}
