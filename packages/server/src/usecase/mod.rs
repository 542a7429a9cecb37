//! Use-case layer: one struct per protocol operation, each depending only on
//! the domain traits.

mod error;
mod join_interview;
mod leave_interview;
mod presence;
mod reap_empty_rooms;
mod relay_chat_message;
mod relay_code_change;
mod room_queries;

pub use error::{GetRoomDetailError, RelayError};
pub use join_interview::{JoinInterviewUseCase, JoinOutcome};
pub use leave_interview::{LeaveInterviewUseCase, LeaveOutcome};
pub use presence::PresenceNotifier;
pub use reap_empty_rooms::ReapEmptyRoomsUseCase;
pub use relay_chat_message::RelayChatMessageUseCase;
pub use relay_code_change::RelayCodeChangeUseCase;
pub use room_queries::{GetRoomDetailUseCase, ListRoomsUseCase};
