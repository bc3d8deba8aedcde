//! UseCase layer: one struct per coordinator operation.
//!
//! Each usecase holds the registry and pusher behind their domain traits and
//! implements one message-oriented operation of the signaling coordinator.
//! Handlers in the UI layer validate the wire envelope, convert to domain
//! types and delegate here.

mod disconnect_participant;
mod end_call;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod relay_signal;

pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use end_call::{EndCallOutcome, EndCallUseCase};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinRequest, JoinRoomUseCase};
pub use relay_signal::{RelayOutcome, RelaySignalUseCase, SignalPayload};
