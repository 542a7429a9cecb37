//! UseCase: leaving an interview room.
//!
//! Covers both the explicit `leave-interview` event and the transport-close
//! path; the caller decides which broadcasts follow. A leave referencing an
//! unknown room or a connection that never joined is a quiet no-op.

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPushError, EventPusher, RoomId, RoomRegistry};

/// What the leave produced.
#[derive(Debug, Clone)]
pub struct LeaveOutcome {
    /// The members remaining in the room, in need of a departure notice.
    pub notify_targets: Vec<ConnectionId>,
    pub remaining_count: usize,
}

pub struct LeaveInterviewUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl LeaveInterviewUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Remove the connection from the room's member set.
    ///
    /// The notify targets are computed before the removal so the departing
    /// connection itself is never among them.
    pub async fn execute(&self, room_id: &RoomId, connection_id: &ConnectionId) -> LeaveOutcome {
        let notify_targets: Vec<ConnectionId> = self
            .registry
            .members(room_id)
            .await
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();

        let remaining_count = self.registry.remove_member(room_id, connection_id).await;

        LeaveOutcome {
            notify_targets,
            remaining_count,
        }
    }

    /// Announce the departure to the remaining members.
    pub async fn broadcast_user_left(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), EventPushError> {
        self.pusher.broadcast(targets, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use codepair_shared::time::FixedClock;
    use tokio::sync::mpsc;

    use crate::domain::{Participant, Timestamp, Username};
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    fn create_test_registry() -> Arc<InMemoryRoomRegistry> {
        Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1000))))
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn participant(name: &str) -> Participant {
        Participant::new(
            ConnectionId::generate(),
            Username::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    async fn join(registry: &Arc<InMemoryRoomRegistry>, room_id: &RoomId, p: Participant) {
        registry.get_or_create(room_id).await;
        registry.add_member(room_id, p).await;
    }

    #[tokio::test]
    async fn test_leave_decrements_count_and_targets_remaining() {
        // Test: the leaver is removed and the remaining member is notified
        // given:
        let registry = create_test_registry();
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveInterviewUseCase::new(registry.clone(), pusher);
        let alice = participant("alice");
        let bob = participant("bob");
        join(&registry, &room("r1"), alice.clone()).await;
        join(&registry, &room("r1"), bob.clone()).await;

        // when:
        let outcome = usecase.execute(&room("r1"), &alice.id).await;

        // then:
        assert_eq!(outcome.remaining_count, 1);
        assert_eq!(outcome.notify_targets, vec![bob.id]);
        assert_eq!(registry.member_count(&room("r1")).await, 1);
    }

    #[tokio::test]
    async fn test_last_leave_empties_room() {
        // Test: removing the last member leaves count 0, room eligible for reap
        // given:
        let registry = create_test_registry();
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveInterviewUseCase::new(registry.clone(), pusher);
        let alice = participant("alice");
        join(&registry, &room("r1"), alice.clone()).await;

        // when:
        let outcome = usecase.execute(&room("r1"), &alice.id).await;

        // then:
        assert_eq!(outcome.remaining_count, 0);
        assert!(outcome.notify_targets.is_empty());
        let stored = registry.get_room(&room("r1")).await.unwrap();
        assert!(stored.idle_since.is_some());
    }

    #[tokio::test]
    async fn test_leave_unknown_room_is_noop() {
        // Test: a leave referencing an unknown room never errors
        // given:
        let registry = create_test_registry();
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveInterviewUseCase::new(registry, pusher);
        let stranger = ConnectionId::generate();

        // when:
        let outcome = usecase.execute(&room("ghost"), &stranger).await;

        // then:
        assert_eq!(outcome.remaining_count, 0);
        assert!(outcome.notify_targets.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_user_left_reaches_targets() {
        // Test: the departure notice is delivered to the remaining members
        // given:
        let registry = create_test_registry();
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveInterviewUseCase::new(registry, pusher.clone());
        let bob = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(bob, tx).await;

        // when:
        usecase
            .broadcast_user_left(vec![bob], r#"{"type":"user-left"}"#)
            .await
            .unwrap();

        // then:
        assert_eq!(rx.recv().await, Some(r#"{"type":"user-left"}"#.to_string()));
    }
}
