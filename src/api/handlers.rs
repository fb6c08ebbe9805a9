//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::state::{AppState, RoomSnapshot};
use super::responses::{ButtonResponse, HealthResponse, RoomResponse};

/// Tooltip the button shows when nothing overrides it
pub const DEFAULT_TOOLTIP: &str = "Ready up";

/// Handle PUT /room - Replace the room snapshot
pub async fn put_room_handler(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<RoomSnapshot>,
) -> Result<Json<RoomResponse>, StatusCode> {
    match state.replace_room("room-update", Some(snapshot)) {
        Ok(room) => {
            info!("Room endpoint called - snapshot replaced");
            Ok(Json(RoomResponse::current("Room snapshot replaced".to_string(), room)))
        }
        Err(e) => {
            warn!("Rejected room snapshot: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// Handle DELETE /room - Leave the room
pub async fn delete_room_handler(State(state): State<Arc<AppState>>) -> Result<Json<RoomResponse>, StatusCode> {
    match state.replace_room("room-leave", None) {
        Ok(_) => {
            info!("Room endpoint called - room cleared");
            Ok(Json(RoomResponse::no_room("Room cleared".to_string())))
        }
        Err(e) => {
            warn!("Failed to clear room: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /room - Return the current room snapshot
pub async fn get_room_handler(State(state): State<Arc<AppState>>) -> Json<RoomResponse> {
    Json(RoomResponse::current("Current room".to_string(), state.get_room()))
}

/// Handle GET /button - Return the ready button state
pub async fn button_handler(State(state): State<Arc<AppState>>) -> Json<ButtonResponse> {
    let view = state.get_button_view();
    let tooltip_text = view.tooltip_or(DEFAULT_TOOLTIP).to_string();

    Json(ButtonResponse {
        view,
        tooltip_text,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action: state.get_last_action(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_room().is_some(), state.get_uptime()))
}
