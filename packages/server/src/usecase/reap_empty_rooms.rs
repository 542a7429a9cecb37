//! UseCase: reaping rooms whose members are all gone.
//!
//! The source of the room map never garbage-collected rooms abandoned by an
//! abrupt disconnect. Here a periodic sweep purges rooms that have been empty
//! for longer than a grace window; within the window the document is retained
//! so a quick reconnect resumes where it left off.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{RoomId, RoomRegistry, Timestamp};

pub struct ReapEmptyRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ReapEmptyRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Purge rooms that have been empty since before `now - grace`.
    ///
    /// # Returns
    ///
    /// The identifiers of the rooms removed by this sweep.
    pub async fn execute(&self, now: Timestamp, grace: Duration) -> Vec<RoomId> {
        let cutoff = Timestamp::new(now.value() - grace.as_millis() as i64);
        let purged = self.registry.purge_empty(cutoff).await;

        for room_id in &purged {
            tracing::info!("Room '{}' reaped after idle grace period", room_id);
        }

        purged
    }
}
