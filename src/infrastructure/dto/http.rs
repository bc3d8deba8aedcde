//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// One room in the `/api/rooms` listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub call_status: String,
    pub participants: Vec<String>,
    pub created_at: String,
}

/// Full room state for `/api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub call_status: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub created_at: String,
}

/// One participant inside a room detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub participant_id: String,
    pub display_name: String,
    pub role: Role,
    pub joined_at: String,
}

/// Response of `/api/rooms/derive/{appointment_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRoomDto {
    pub room_id: String,
}
