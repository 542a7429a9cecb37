//! WebSocket-backed `EventPusher` implementation.
//!
//! Holds the `UnboundedSender` for each live connection. The WebSocket itself
//! is accepted in the UI layer, which hands the sender half over at
//! registration time; this type only manages the senders and performs the
//! outbound fan-out.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPushError, EventPusher, PusherChannel};

pub struct WebSocketEventPusher {
    /// Outbound channel per live connection.
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered with pusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from pusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| EventPushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(EventPushError::ClientNotFound(connection_id.to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), EventPushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // A failed send to one gone peer must not abort the fan-out.
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted event to connection '{}'", target);
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_push_to_success() {
        // Test: a registered connection receives a pushed event
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();
        pusher.register_client(connection_id, tx).await;

        // when:
        let result = pusher.push_to(&connection_id, "Hello").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // Test: pushing to an unregistered connection returns a typed error
        // given:
        let pusher = WebSocketEventPusher::new();
        let connection_id = ConnectionId::generate();

        // when:
        let result = pusher.push_to(&connection_id, "Hello").await;

        // then:
        assert!(matches!(
            result.unwrap_err(),
            EventPushError::ClientNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_targets() {
        // Test: every target connection receives the broadcast
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(bob, tx2).await;

        // when:
        let result = pusher.broadcast(vec![alice, bob], "Broadcast event").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast event".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast event".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_missing_target() {
        // Test: a missing target is skipped and the rest still receive
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let gone = ConnectionId::generate();
        pusher.register_client(alice, tx1).await;

        // when:
        let result = pusher.broadcast(vec![alice, gone], "Broadcast event").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast event".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_receiver() {
        // Test: a closed peer channel does not abort the fan-out
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(bob, tx2).await;
        drop(rx1);

        // when:
        let result = pusher.broadcast(vec![alice, bob], "Broadcast event").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx2.recv().await, Some("Broadcast event".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // Test: an empty target list is not an error
        // given:
        let pusher = WebSocketEventPusher::new();

        // when:
        let result = pusher.broadcast(vec![], "Event").await;

        // then:
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        // Test: an unregistered connection no longer receives pushes
        // given:
        let pusher = WebSocketEventPusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();
        pusher.register_client(connection_id, tx).await;

        // when:
        pusher.unregister_client(&connection_id).await;
        let result = pusher.push_to(&connection_id, "Hello").await;

        // then:
        assert!(matches!(
            result.unwrap_err(),
            EventPushError::ClientNotFound(_)
        ));
    }
}
