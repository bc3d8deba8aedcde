//! WebRTC signaling server for two-party video consultations.
//!
//! Relays SDP offers/answers and ICE candidates between the doctor and the
//! patient of an appointment room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin signaling-server
//! cargo run --bin signaling-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use consult_signaling::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        DisconnectParticipantUseCase, EndCallUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, RelaySignalUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "signaling-server")]
#[command(about = "WebRTC signaling server for two-party consultations", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    let registry = Arc::new(InMemoryRoomRegistry::new(Box::new(SystemClock)));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock,
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let end_call_usecase = Arc::new(EndCallUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry));

    let server = Server::new(
        join_room_usecase,
        relay_signal_usecase,
        end_call_usecase,
        disconnect_participant_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
