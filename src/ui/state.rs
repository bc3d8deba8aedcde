//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectParticipantUseCase, EndCallUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    JoinRoomUseCase, RelaySignalUseCase,
};

/// Shared application state
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub end_call_usecase: Arc<EndCallUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// MessagePusher, used directly to report errors to the offending connection
    pub message_pusher: Arc<dyn MessagePusher>,
}
