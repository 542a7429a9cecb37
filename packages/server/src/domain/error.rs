//! Error types for the domain layer.

use thiserror::Error;

/// Validation errors raised by value object constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id is too long ({0} chars)")]
    RoomIdTooLong(usize),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username is too long ({0} chars)")]
    UsernameTooLong(usize),

    #[error("message body must not be empty")]
    EmptyMessageBody,

    #[error("message body is too long ({0} chars)")]
    MessageBodyTooLong(usize),

    #[error("code text is too large ({0} bytes)")]
    CodeTextTooLarge(usize),
}

/// Illegal transitions of the per-connection session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionStateError {
    #[error("connection is not authenticated")]
    NotAuthenticated,

    #[error("connection is already authenticated")]
    AlreadyAuthenticated,

    #[error("connection has not joined a room")]
    NotJoined,

    #[error("connection already joined room '{0}'")]
    AlreadyJoined(String),

    #[error("connection is closed")]
    Closed,
}

/// Authentication failures at connection time.
///
/// Raised before any room interaction; the connection is refused and the
/// client can detect the rejection and re-prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no credential supplied")]
    MissingToken,

    #[error("invalid credential: {0}")]
    InvalidToken(String),
}

/// Failures when pushing an event to a client connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventPushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),
}
