//! Collaborative interview session server.
//!
//! Creates ephemeral interview rooms, relays chat and shared-editor events
//! between their members, and broadcasts presence changes.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codepair-server
//! cargo run --bin codepair-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use codepair_server::{
    infrastructure::{
        auth::OpaqueTokenVerifier, pusher::WebSocketEventPusher, registry::InMemoryRoomRegistry,
    },
    ui::{ReaperConfig, Server},
    usecase::{
        GetRoomDetailUseCase, JoinInterviewUseCase, LeaveInterviewUseCase, ListRoomsUseCase,
        PresenceNotifier, ReapEmptyRoomsUseCase, RelayChatMessageUseCase, RelayCodeChangeUseCase,
    },
};
use codepair_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "codepair-server")]
#[command(about = "Real-time collaborative interview session server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds an empty room is retained before the reaper purges it
    #[arg(long, default_value = "60")]
    room_grace_secs: u64,

    /// Seconds between reaper sweeps
    #[arg(long, default_value = "30")]
    reap_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. EventPusher
    // 3. TokenVerifier
    // 4. UseCases
    // 5. Server

    // 1. Create the room registry (in-memory, ephemeral)
    let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(SystemClock)));

    // 2. Create the event pusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketEventPusher::new());

    // 3. Create the token verifier (opaque bearer tokens)
    let verifier = Arc::new(OpaqueTokenVerifier);

    // 4. Create the use cases
    let join_interview_usecase = Arc::new(JoinInterviewUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let leave_interview_usecase = Arc::new(LeaveInterviewUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let relay_chat_message_usecase = Arc::new(RelayChatMessageUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let relay_code_change_usecase = Arc::new(RelayCodeChangeUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let presence_notifier = Arc::new(PresenceNotifier::new(registry.clone(), pusher.clone()));
    let reap_empty_rooms_usecase = Arc::new(ReapEmptyRoomsUseCase::new(registry.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
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
        ReaperConfig {
            grace: Duration::from_secs(args.room_grace_secs),
            interval: Duration::from_secs(args.reap_interval_secs),
        },
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
