//! Server execution logic.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use codepair_shared::time::get_utc_timestamp;

use crate::domain::{EventPusher, Timestamp, TokenVerifier};
use crate::usecase::{
    GetRoomDetailUseCase, JoinInterviewUseCase, LeaveInterviewUseCase, ListRoomsUseCase,
    PresenceNotifier, ReapEmptyRoomsUseCase, RelayChatMessageUseCase, RelayCodeChangeUseCase,
};

use super::{
    handler::{
        http::{get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Timing of the background sweep that deletes abandoned rooms.
#[derive(Debug, Clone, Copy)]
pub struct ReaperConfig {
    /// How long a room may stay empty before it is purged.
    pub grace: Duration,
    /// How often the sweep runs.
    pub interval: Duration,
}

/// Collaborative interview session server.
pub struct Server {
    join_interview_usecase: Arc<JoinInterviewUseCase>,
    leave_interview_usecase: Arc<LeaveInterviewUseCase>,
    relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
    relay_code_change_usecase: Arc<RelayCodeChangeUseCase>,
    presence_notifier: Arc<PresenceNotifier>,
    reap_empty_rooms_usecase: Arc<ReapEmptyRoomsUseCase>,
    list_rooms_usecase: Arc<ListRoomsUseCase>,
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pusher: Arc<dyn EventPusher>,
    verifier: Arc<dyn TokenVerifier>,
    reaper_config: ReaperConfig,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        join_interview_usecase: Arc<JoinInterviewUseCase>,
        leave_interview_usecase: Arc<LeaveInterviewUseCase>,
        relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
        relay_code_change_usecase: Arc<RelayCodeChangeUseCase>,
        presence_notifier: Arc<PresenceNotifier>,
        reap_empty_rooms_usecase: Arc<ReapEmptyRoomsUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        pusher: Arc<dyn EventPusher>,
        verifier: Arc<dyn TokenVerifier>,
        reaper_config: ReaperConfig,
    ) -> Self {
        Self {
            join_interview_usecase,
            leave_interview_usecase,
            relay_chat_message_usecase,
            relay_code_change_usecase,
            presence_notifier,
            reap_empty_rooms_usecase,
            list_rooms_usecase,
            get_room_detail_usecase,
            pusher,
            verifier,
            reaper_config,
        }
    }

    /// Build the axum router over the shared state.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            join_interview_usecase: self.join_interview_usecase.clone(),
            leave_interview_usecase: self.leave_interview_usecase.clone(),
            relay_chat_message_usecase: self.relay_chat_message_usecase.clone(),
            relay_code_change_usecase: self.relay_code_change_usecase.clone(),
            presence_notifier: self.presence_notifier.clone(),
            list_rooms_usecase: self.list_rooms_usecase.clone(),
            get_room_detail_usecase: self.get_room_detail_usecase.clone(),
            pusher: self.pusher.clone(),
            verifier: self.verifier.clone(),
        });

        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP inspection endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the session server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Background sweep for rooms whose members are all gone.
        let reaper = self.reap_empty_rooms_usecase.clone();
        let ReaperConfig { grace, interval } = self.reaper_config;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = reaper
                    .execute(Timestamp::new(get_utc_timestamp()), grace)
                    .await;
                if !purged.is_empty() {
                    tracing::debug!("Reaped {} idle room(s)", purged.len());
                }
            }
        });

        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Collaborative session server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
