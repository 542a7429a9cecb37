//! Domain entities: the ephemeral interview room and its participants.

use super::value_object::{CodeText, ConnectionId, RoomId, Timestamp, Username};

/// A connection that joined a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub username: Username,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ConnectionId, username: Username, joined_at: Timestamp) -> Self {
        Self {
            id,
            username,
            joined_at,
        }
    }
}

/// An ephemeral collaboration context grouping connections.
///
/// Rooms are created on the first join referencing an unknown identifier and
/// become eligible for deletion once their member set is empty. The shared
/// document is a last-write-wins value; no merge, no history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<Participant>,
    pub document: CodeText,
    pub created_at: Timestamp,
    /// Set while the room has no members; cleared on join. The reaper purges
    /// rooms whose idle period exceeds the grace window.
    pub idle_since: Option<Timestamp>,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            participants: Vec::new(),
            document: CodeText::empty(),
            created_at,
            idle_since: Some(created_at),
        }
    }

    /// Add a participant to the member set.
    ///
    /// A connection that is already a member is not added twice; the call is
    /// a no-op and the unchanged count is returned.
    pub fn add_participant(&mut self, participant: Participant) -> usize {
        if !self.is_member(&participant.id) {
            self.participants.push(participant);
            self.idle_since = None;
        }
        self.participants.len()
    }

    /// Remove a participant and return the new member count.
    ///
    /// Removing an unknown connection is a no-op. When the set becomes empty
    /// the room is stamped idle as of `now`.
    pub fn remove_participant(&mut self, connection_id: &ConnectionId, now: Timestamp) -> usize {
        self.participants.retain(|p| &p.id != connection_id);
        if self.participants.is_empty() && self.idle_since.is_none() {
            self.idle_since = Some(now);
        }
        self.participants.len()
    }

    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.participants.iter().any(|p| &p.id == connection_id)
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    pub fn member_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Overwrite the shared document. Last writer wins.
    pub fn set_document(&mut self, code: CodeText) {
        self.document = code;
    }

    pub fn document(&self) -> &CodeText {
        &self.document
    }
}
