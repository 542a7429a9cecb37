//! Value objects for the collaborative session domain.
//!
//! Each constructor validates its input and returns a `DomainError` on
//! rejection, so invalid state cannot be represented further in.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

const MAX_ROOM_ID_CHARS: usize = 128;
const MAX_USERNAME_CHARS: usize = 64;
const MAX_MESSAGE_CHARS: usize = 2000;
const MAX_CODE_BYTES: usize = 256 * 1024;

/// Caller-supplied room identifier (e.g. `interview_1719237812345`).
///
/// Uniqueness is enforced only by registry lookup; the server does not
/// generate these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyRoomId);
        }
        if value.chars().count() > MAX_ROOM_ID_CHARS {
            return Err(DomainError::RoomIdTooLong(value.chars().count()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-generated identifier for a live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh identifier for a newly accepted connection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if value.chars().count() > MAX_USERNAME_CHARS {
            return Err(DomainError::UsernameTooLong(value.chars().count()));
        }
        Ok(Self(value))
    }

    /// Fallback name for connections that never supplied one.
    pub fn guest() -> Self {
        Self("Guest".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Body of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyMessageBody);
        }
        if value.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::MessageBodyTooLong(value.chars().count()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// The shared editor text of a room. May be empty; last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeText(String);

impl CodeText {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.len() > MAX_CODE_BYTES {
            return Err(DomainError::CodeTextTooLarge(value.len()));
        }
        Ok(Self(value))
    }

    /// The document of a freshly created room.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
