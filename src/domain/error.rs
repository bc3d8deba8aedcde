//! Domain error types.

use thiserror::Error;

use super::room::CallStatus;

/// Validation errors for domain value objects
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("appointment id must not be empty")]
    EmptyAppointmentId,

    #[error("participant id must not be empty")]
    EmptyParticipantId,
}

/// Errors raised by the room registry.
///
/// `RoomFull` is surfaced to the offending connection only. An
/// `InvalidTransition` is an internal consistency fault: callers log it and
/// treat the status update as a no-op, it never reaches a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room '{room_id}' already has two participants")]
    RoomFull { room_id: String },

    #[error("invalid call status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: CallStatus, to: CallStatus },

    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors raised when pushing a message to a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' not registered")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
