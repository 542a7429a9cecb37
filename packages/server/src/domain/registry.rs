//! Room registry trait.
//!
//! The interface the session layer needs for room bookkeeping. The concrete
//! implementation lives in the infrastructure layer (dependency inversion);
//! tests inject their own registry instances for isolation.
//!
//! Membership and document operations referencing an unknown room are no-ops,
//! never errors: a late disconnect or a stale event must not crash the relay
//! path.

use async_trait::async_trait;

use super::entity::{Participant, Room};
use super::value_object::{CodeText, ConnectionId, RoomId, Timestamp};

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Return the room, creating it with an empty member set and empty
    /// document when the identifier is unknown. Idempotent under concurrent
    /// calls for the same identifier.
    async fn get_or_create(&self, room_id: &RoomId) -> Room;

    /// Insert a participant into the room's member set and return the new
    /// count. Adding a connection that is already a member, or targeting an
    /// unknown room, changes nothing.
    async fn add_member(&self, room_id: &RoomId, participant: Participant) -> usize;

    /// Remove a connection from the room's member set and return the new
    /// count. An empty result makes the room eligible for reaping.
    async fn remove_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> usize;

    /// Overwrite the room's shared document. Last writer wins.
    async fn set_document(&self, room_id: &RoomId, code: CodeText);

    /// Read the room's shared document.
    async fn get_document(&self, room_id: &RoomId) -> Option<CodeText>;

    /// Connection ids of every current member.
    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// Current member count; 0 for an unknown room.
    async fn member_count(&self, room_id: &RoomId) -> usize;

    /// Snapshot of the room's participants.
    async fn participants(&self, room_id: &RoomId) -> Vec<Participant>;

    /// Snapshot of one room.
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Snapshot of every registered room.
    async fn list_rooms(&self) -> Vec<Room>;

    /// Delete rooms that have been empty since before `idle_cutoff` and
    /// return their identifiers.
    async fn purge_empty(&self, idle_cutoff: Timestamp) -> Vec<RoomId>;
}
