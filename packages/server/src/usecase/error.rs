//! Error types for the use-case layer.

use thiserror::Error;

/// Failures while relaying an event to the other members of a room.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("failed to broadcast event: {0}")]
    BroadcastFailed(String),
}

/// Failures while resolving a room detail query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
