//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectParticipantUseCase, EndCallUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    JoinRoomUseCase, RelaySignalUseCase,
};

use super::{
    handler::{derive_room, get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebRTC signaling server
///
/// Owns the usecases and exposes them over one WebSocket endpoint and a
/// small operational HTTP API.
pub struct Server {
    join_room_usecase: Arc<JoinRoomUseCase>,
    relay_signal_usecase: Arc<RelaySignalUseCase>,
    end_call_usecase: Arc<EndCallUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        end_call_usecase: Arc<EndCallUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            relay_signal_usecase,
            end_call_usecase,
            disconnect_participant_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            message_pusher,
        }
    }

    /// Build the router backed by this server's state
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase.clone(),
            relay_signal_usecase: self.relay_signal_usecase.clone(),
            end_call_usecase: self.end_call_usecase.clone(),
            disconnect_participant_usecase: self.disconnect_participant_usecase.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
            get_room_detail_usecase: self.get_room_detail_usecase.clone(),
            message_pusher: self.message_pusher.clone(),
        });

        Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/derive/{appointment_id}", get(derive_room))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the signaling server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the given address or
    /// fails during execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
