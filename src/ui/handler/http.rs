//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{DerivedRoomDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List all live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get one room's full state by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::try_from(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Some(room) => Ok(Json(RoomDetailDto::from(&room))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Derive the canonical room id for an appointment
pub async fn derive_room(
    Path(appointment_id): Path<String>,
) -> Result<Json<DerivedRoomDto>, StatusCode> {
    let room_id =
        RoomId::for_appointment(&appointment_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok(Json(DerivedRoomDto {
        room_id: room_id.as_str().to_string(),
    }))
}
