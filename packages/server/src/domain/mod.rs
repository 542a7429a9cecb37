//! Domain layer: value objects, entities, and the interfaces the rest of the
//! server depends on.
//!
//! The traits defined here (`RoomRegistry`, `EventPusher`, `TokenVerifier`)
//! are implemented by the infrastructure layer; use cases depend only on the
//! traits (dependency inversion).

pub mod auth;
pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod session;
pub mod value_object;

pub use auth::{TokenVerifier, UserIdentity};
pub use entity::{Participant, Room};
pub use error::{AuthError, DomainError, EventPushError, SessionStateError};
pub use pusher::{EventPusher, PusherChannel};
pub use registry::RoomRegistry;
pub use session::{Session, SessionPhase};
pub use value_object::{CodeText, ConnectionId, MessageBody, RoomId, Timestamp, Username};
