//! API response structures

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    button::ButtonView,
    state::{LastAction, RoomSnapshot},
};

/// Response for room endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub room: Option<RoomSnapshot>,
}

impl RoomResponse {
    /// Create a new room response
    pub fn new(status: String, message: String, room: Option<RoomSnapshot>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            room,
        }
    }

    /// A room is present
    pub fn in_room(message: String, room: Arc<RoomSnapshot>) -> Self {
        Self::new("in_room".to_string(), message, Some(room.as_ref().clone()))
    }

    /// No room is present
    pub fn no_room(message: String) -> Self {
        Self::new("no_room".to_string(), message, None)
    }

    /// Build from the current snapshot
    pub fn current(message: String, room: Option<Arc<RoomSnapshot>>) -> Self {
        match room {
            Some(room) => Self::in_room(message, room),
            None => Self::no_room(message),
        }
    }
}

/// Ready button state with the tooltip resolved against the default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonResponse {
    pub view: ButtonView,
    pub tooltip_text: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<LastAction>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub in_room: bool,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(in_room: bool, uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            in_room,
            uptime,
        }
    }
}
