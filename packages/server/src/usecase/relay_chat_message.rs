//! UseCase: relaying a chat message to the sender's room.
//!
//! The message is forwarded verbatim to every member except the sender;
//! nothing is stored. The sender's own client keeps its local history, so no
//! echo is sent back.

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, RoomId, RoomRegistry};

use super::error::RelayError;

pub struct RelayChatMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl RelayChatMessageUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Relay the serialized chat event to every other member of the room.
    ///
    /// # Returns
    ///
    /// The connections the event was fanned out to. An unknown room yields an
    /// empty target list, not an error.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        message: &str,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets: Vec<ConnectionId> = self
            .registry
            .members(room_id)
            .await
            .into_iter()
            .filter(|id| id != sender)
            .collect();

        self.pusher
            .broadcast(targets.clone(), message)
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;

        Ok(targets)
    }
}
