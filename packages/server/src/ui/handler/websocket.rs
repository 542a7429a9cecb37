//! WebSocket connection handler.
//!
//! The connection endpoint verifies the credential before the upgrade, then
//! runs one receive loop per connection. Every inbound event lands in
//! `handle_client_event`, a single exhaustive match over the typed protocol,
//! guarded by the per-connection session state machine.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use codepair_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};

use crate::domain::{
    CodeText, ConnectionId, MessageBody, Participant, RoomId, Session, Timestamp, UserIdentity,
    Username,
};
use crate::infrastructure::dto::ws::{ClientEvent, ParticipantInfo, ServerEvent};

use super::super::state::AppState;

/// Query parameters for the WebSocket connection handshake.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Opaque bearer token; its absence refuses the connection.
    pub token: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Verify the credential before any room interaction.
    let identity = match state.verifier.verify(query.token.as_deref()).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let connection_id = ConnectionId::generate();
    let mut session = Session::new(connection_id);
    session
        .authenticate()
        .expect("fresh session accepts authentication");

    // Create the outbound channel for this connection and register it.
    let (tx, rx) = mpsc::unbounded_channel();
    state.pusher.register_client(connection_id, tx).await;

    tracing::info!("Connection '{}' authenticated", connection_id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session, identity, rx)))
}

/// Spawns a task that drains the rx channel into the WebSocket sender.
///
/// Messages from other connections arrive on the channel and are written to
/// this client's socket; the task ends when either side goes away.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    mut session: Session,
    identity: UserIdentity,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let connection_id = session.connection_id();
    let (sender, mut receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);

    // Each inbound event is handled to completion before the next is read.
    loop {
        tokio::select! {
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => {
                                handle_client_event(&state, &mut session, &identity, event).await;
                            }
                            Err(e) => {
                                tracing::warn!("Failed to parse client event: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Connection '{}' requested close", connection_id);
                        break;
                    }
                    Some(Ok(Message::Ping(_))) => {
                        // Ping/pong is handled by the WebSocket layer.
                        tracing::debug!("Received ping");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut send_task => {
                // The push side is gone; treat the connection as closed.
                break;
            }
        }
    }

    send_task.abort();

    // A disconnect at any point runs the leave path exactly once.
    if let Some(room_id) = session.close() {
        depart_room(&state, connection_id, session.username().clone(), room_id).await;
    }
    state.pusher.unregister_client(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Dispatch one inbound event against the session state machine.
///
/// Failures stay local to this connection: invalid payloads and illegal
/// transitions are logged and dropped, never propagated to other members.
pub(crate) async fn handle_client_event(
    state: &AppState,
    session: &mut Session,
    identity: &UserIdentity,
    event: ClientEvent,
) {
    let connection_id = session.connection_id();

    match event {
        ClientEvent::JoinInterview {
            interview_id,
            username,
        } => {
            let room_id = match RoomId::new(interview_id) {
                Ok(room_id) => room_id,
                Err(e) => {
                    tracing::warn!("Ignoring join with invalid room id: {}", e);
                    return;
                }
            };
            let username = username
                .and_then(|name| Username::new(name).ok())
                .or_else(|| identity.display_name.clone())
                .unwrap_or_else(Username::guest);

            if let Err(e) = session.join(room_id.clone(), username.clone()) {
                tracing::warn!("Ignoring join from '{}': {}", connection_id, e);
                return;
            }

            let joined_at = Timestamp::new(get_utc_timestamp());
            let participant = Participant::new(connection_id, username.clone(), joined_at);
            let outcome = state
                .join_interview_usecase
                .execute(&room_id, participant)
                .await;

            tracing::info!(
                "Connection '{}' joined room '{}' as '{}' ({} member(s))",
                connection_id,
                room_id,
                username.as_str(),
                outcome.participant_count
            );

            // Current document and member list, to the joiner only.
            let room_state = ServerEvent::RoomState {
                code: outcome.document.as_str().to_string(),
                participants: outcome
                    .participants
                    .iter()
                    .map(|p| ParticipantInfo {
                        user_id: p.id.to_string(),
                        username: p.username.as_str().to_string(),
                        joined_at: timestamp_to_rfc3339(p.joined_at.value()),
                    })
                    .collect(),
            };
            let room_state_json = serde_json::to_string(&room_state).unwrap();
            if let Err(e) = state.pusher.push_to(&connection_id, &room_state_json).await {
                tracing::warn!("Failed to send room state to '{}': {}", connection_id, e);
            }

            // Announce the newcomer to the existing members.
            let joined_event = ServerEvent::UserJoined {
                user_id: connection_id.to_string(),
                username: username.as_str().to_string(),
            };
            let joined_json = serde_json::to_string(&joined_event).unwrap();
            if let Err(e) = state
                .join_interview_usecase
                .broadcast_user_joined(&room_id, &connection_id, &joined_json)
                .await
            {
                tracing::warn!("Failed to broadcast user-joined: {}", e);
            }

            broadcast_presence(state, &room_id).await;
        }

        ClientEvent::InterviewMessage {
            interview_id,
            user,
            message,
            timestamp,
        } => {
            let Some(room_id) = session.room().cloned() else {
                tracing::warn!("Ignoring chat from '{}' before join", connection_id);
                return;
            };
            if room_id.as_str() != interview_id {
                tracing::warn!(
                    "Ignoring chat from '{}' addressed to room '{}' (joined '{}')",
                    connection_id,
                    interview_id,
                    room_id
                );
                return;
            }
            let body = match MessageBody::new(message) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Ignoring chat from '{}': {}", connection_id, e);
                    return;
                }
            };
            let user = Username::new(user).unwrap_or_else(|_| session.username().clone());
            // The client's timestamp is kept when supplied; otherwise the
            // relay is stamped with the server-observed time.
            let timestamp =
                timestamp.unwrap_or_else(|| timestamp_to_rfc3339(get_utc_timestamp()));

            let relay = ServerEvent::InterviewMessage {
                interview_id: room_id.as_str().to_string(),
                user: user.into_string(),
                message: body.into_string(),
                timestamp,
            };
            let relay_json = serde_json::to_string(&relay).unwrap();
            match state
                .relay_chat_message_usecase
                .execute(&room_id, &connection_id, &relay_json)
                .await
            {
                Ok(targets) => {
                    tracing::debug!(
                        "Relayed chat from '{}' to {} member(s) of '{}'",
                        connection_id,
                        targets.len(),
                        room_id
                    );
                }
                Err(e) => tracing::warn!("Failed to relay chat: {}", e),
            }
        }

        ClientEvent::CodeChange { interview_id, code } => {
            let Some(room_id) = session.room().cloned() else {
                tracing::warn!("Ignoring code change from '{}' before join", connection_id);
                return;
            };
            if room_id.as_str() != interview_id {
                tracing::warn!(
                    "Ignoring code change from '{}' addressed to room '{}' (joined '{}')",
                    connection_id,
                    interview_id,
                    room_id
                );
                return;
            }
            let code = match CodeText::new(code) {
                Ok(code) => code,
                Err(e) => {
                    tracing::warn!("Ignoring code change from '{}': {}", connection_id, e);
                    return;
                }
            };

            let relay = ServerEvent::CodeChange {
                code: code.as_str().to_string(),
            };
            let relay_json = serde_json::to_string(&relay).unwrap();
            match state
                .relay_code_change_usecase
                .execute(&room_id, &connection_id, code, &relay_json)
                .await
            {
                Ok(targets) => {
                    tracing::debug!(
                        "Relayed code change from '{}' to {} member(s) of '{}'",
                        connection_id,
                        targets.len(),
                        room_id
                    );
                }
                Err(e) => tracing::warn!("Failed to relay code change: {}", e),
            }
        }

        ClientEvent::LeaveInterview => match session.leave() {
            Ok(room_id) => {
                depart_room(state, connection_id, session.username().clone(), room_id).await;
            }
            Err(e) => {
                tracing::warn!("Ignoring leave from '{}': {}", connection_id, e);
            }
        },
    }
}

/// Remove the connection from its room and notify the remaining members.
///
/// Shared by the explicit leave event and the transport-close path.
async fn depart_room(
    state: &AppState,
    connection_id: ConnectionId,
    username: Username,
    room_id: RoomId,
) {
    let outcome = state
        .leave_interview_usecase
        .execute(&room_id, &connection_id)
        .await;

    tracing::info!(
        "Connection '{}' left room '{}' ({} member(s) remain)",
        connection_id,
        room_id,
        outcome.remaining_count
    );

    if outcome.notify_targets.is_empty() {
        return;
    }

    let left_event = ServerEvent::UserLeft {
        user_id: connection_id.to_string(),
        username: username.into_string(),
    };
    let left_json = serde_json::to_string(&left_event).unwrap();
    if let Err(e) = state
        .leave_interview_usecase
        .broadcast_user_left(outcome.notify_targets, &left_json)
        .await
    {
        tracing::warn!("Failed to broadcast user-left: {}", e);
    }

    broadcast_presence(state, &room_id).await;
}

/// Recompute the room's member count and push it to every member.
async fn broadcast_presence(state: &AppState, room_id: &RoomId) {
    let count = state.presence_notifier.current_count(room_id).await;
    let update = ServerEvent::ParticipantsUpdate { count };
    let update_json = serde_json::to_string(&update).unwrap();
    if let Err(e) = state
        .presence_notifier
        .broadcast_count(room_id, &update_json)
        .await
    {
        tracing::warn!("Failed to broadcast participants-update: {}", e);
    }
}
