//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, MessagePusher, ParticipantId, RegistryError, RoomId},
    infrastructure::dto::websocket::{ClientEvent, ErrorCode, ServerEvent},
    ui::state::AppState,
    usecase::{JoinRequest, SignalPayload},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the push channel into the WebSocket sink.
///
/// All server-to-client traffic flows through this single writer, which
/// keeps per-connection delivery in push order.
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
        // Channel closed: the connection was retired (reconnect replaced it)
        // or is shutting down. Run the close handshake so the client sees a
        // clean closure instead of a TCP reset.
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Identity is per connection. Room association comes later, from the
    // client's join-room event.
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' established", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&state_clone, connection_id, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", connection_id);
                }
                Message::Binary(_) => {
                    tracing::warn!("Binary frame from '{}'", connection_id);
                    report_error(
                        &state_clone,
                        connection_id,
                        ErrorCode::MalformedMessage,
                        "Signaling events must be text frames",
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If either direction finishes, tear the other one down.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcome = state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed (room removed: {}, peer notified: {})",
        connection_id,
        outcome.room_removed,
        outcome.peer_notified
    );
}

async fn handle_text(state: &Arc<AppState>, connection_id: ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Malformed message from '{}': {}", connection_id, e);
            report_error(
                state,
                connection_id,
                ErrorCode::MalformedMessage,
                &format!("Unparseable signaling event: {}", e),
            )
            .await;
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom {
            room_id,
            participant_id,
            display_name,
            role,
        } => {
            let request = match (RoomId::try_from(room_id), ParticipantId::new(participant_id)) {
                (Ok(room_id), Ok(participant_id)) => JoinRequest {
                    room_id,
                    participant_id,
                    display_name: DisplayName::new(display_name),
                    role,
                },
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Invalid join-room from '{}': {}", connection_id, e);
                    report_error(
                        state,
                        connection_id,
                        ErrorCode::MalformedMessage,
                        &e.to_string(),
                    )
                    .await;
                    return;
                }
            };
            let room_id = request.room_id.clone();
            match state.join_room_usecase.execute(connection_id, request).await {
                Ok(()) => {}
                Err(RegistryError::RoomFull { .. }) => {
                    report_error(
                        state,
                        connection_id,
                        ErrorCode::RoomFull,
                        &format!("Room '{}' already has two participants", room_id),
                    )
                    .await;
                }
                Err(e) => {
                    tracing::warn!("Join failed for '{}': {}", connection_id, e);
                }
            }
        }
        ClientEvent::Offer { room_id, sdp } => {
            relay(state, connection_id, room_id, SignalPayload::Offer { sdp }).await;
        }
        ClientEvent::Answer { room_id, sdp } => {
            relay(state, connection_id, room_id, SignalPayload::Answer { sdp }).await;
        }
        ClientEvent::IceCandidate { room_id, candidate } => {
            relay(
                state,
                connection_id,
                room_id,
                SignalPayload::IceCandidate { candidate },
            )
            .await;
        }
        ClientEvent::EndCall { room_id } => {
            let room_id = match RoomId::try_from(room_id) {
                Ok(room_id) => room_id,
                Err(e) => {
                    tracing::warn!("Invalid end-call from '{}': {}", connection_id, e);
                    report_error(
                        state,
                        connection_id,
                        ErrorCode::MalformedMessage,
                        &e.to_string(),
                    )
                    .await;
                    return;
                }
            };
            state.end_call_usecase.execute(connection_id, room_id).await;
        }
    }
}

async fn relay(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_id: String,
    payload: SignalPayload,
) {
    let Ok(room_id) = RoomId::try_from(room_id) else {
        report_error(
            state,
            connection_id,
            ErrorCode::MalformedMessage,
            "Room id must not be empty",
        )
        .await;
        return;
    };
    state
        .relay_signal_usecase
        .execute(connection_id, room_id, payload)
        .await;
}

/// Send a request-scoped error event to the offending connection only
async fn report_error(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    code: ErrorCode,
    message: &str,
) {
    let event = ServerEvent::Error {
        code,
        message: message.to_string(),
    };
    let json = match serde_json::to_string(&event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize error event: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.push_to(connection_id, &json).await {
        tracing::debug!("Could not report error to '{}': {}", connection_id, e);
    }
}
