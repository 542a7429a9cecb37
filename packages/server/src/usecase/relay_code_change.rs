//! UseCase: applying and relaying a shared-editor change.
//!
//! The new text overwrites the room's document (last write wins, no merge)
//! and is then relayed to every member except the sender. Pluggable conflict
//! resolution would slot in at `RoomRegistry::set_document`.

use std::sync::Arc;

use crate::domain::{CodeText, ConnectionId, EventPusher, RoomId, RoomRegistry};

use super::error::RelayError;

pub struct RelayCodeChangeUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl RelayCodeChangeUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Overwrite the room's document, then relay the new text.
    ///
    /// The registry write happens first so any subsequent joiner observes
    /// this text even if the fan-out fails.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        code: CodeText,
        message: &str,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        self.registry.set_document(room_id, code).await;

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
