//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::domain::{EventPusher, TokenVerifier};
use crate::usecase::{
    GetRoomDetailUseCase, JoinInterviewUseCase, LeaveInterviewUseCase, ListRoomsUseCase,
    PresenceNotifier, RelayChatMessageUseCase, RelayCodeChangeUseCase,
};

/// Shared application state
pub struct AppState {
    pub join_interview_usecase: Arc<JoinInterviewUseCase>,
    pub leave_interview_usecase: Arc<LeaveInterviewUseCase>,
    pub relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
    pub relay_code_change_usecase: Arc<RelayCodeChangeUseCase>,
    pub presence_notifier: Arc<PresenceNotifier>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Outbound fan-out channels, one per live connection.
    pub pusher: Arc<dyn EventPusher>,
    /// Credential check at connection time.
    pub verifier: Arc<dyn TokenVerifier>,
}
