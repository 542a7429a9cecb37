//! Event pusher trait.
//!
//! Outbound fan-out to client connections, abstracted away from the
//! transport. The WebSocket implementation lives in the infrastructure
//! layer; tests use channel-backed fakes or mocks.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::EventPushError;
use super::value_object::ConnectionId;

/// Channel used to hand serialized events to a connection's push task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// Register the outbound channel of a newly accepted connection.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop the outbound channel of a closed connection.
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Push a serialized event to one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError>;

    /// Push a serialized event to every target connection.
    ///
    /// A send failure to one disconnected peer is logged and skipped; the
    /// remaining targets still receive the event.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), EventPushError>;
}
