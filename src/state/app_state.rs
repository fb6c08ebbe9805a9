//! State shared with the HTTP layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

use super::{room::RoomSnapshot, room_state::{RoomSource, RoomState}};
use crate::{button::ButtonView, utils::format_uptime};

/// Most recent change pushed through the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub action: String,
    pub at: DateTime<Utc>,
}

/// Application state: the hosted room and the ready button bound to it
#[derive(Debug)]
pub struct AppState {
    /// Room snapshot cache the ready button is subscribed to
    pub room: Arc<RoomState>,
    /// Latest view published by the ready button
    pub button_view: watch::Receiver<ButtonView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_action: Mutex<Option<LastAction>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        room: Arc<RoomState>,
        button_view: watch::Receiver<ButtonView>,
    ) -> Self {
        Self {
            room,
            button_view,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Replace the hosted room, recording the action
    pub fn replace_room(&self, action: &str, snapshot: Option<RoomSnapshot>) -> Result<Option<Arc<RoomSnapshot>>, String> {
        if let Some(snapshot) = &snapshot {
            snapshot.validate()?;
        }

        info!(
            "{}: {}",
            action,
            match &snapshot {
                Some(room) => format!("{} user(s), countdown {:?}", room.users.len(), room.countdown.as_ref().map(|c| c.id)),
                None => "no room".to_string(),
            }
        );
        self.room.replace(snapshot);

        *self.last_action.lock().unwrap_or_else(|e| e.into_inner()) = Some(LastAction {
            action: action.to_string(),
            at: Utc::now(),
        });

        Ok(self.room.room())
    }

    /// Current room snapshot
    pub fn get_room(&self) -> Option<Arc<RoomSnapshot>> {
        self.room.room()
    }

    /// Latest button view
    pub fn get_button_view(&self) -> ButtonView {
        self.button_view.borrow().clone()
    }

    /// Server uptime, e.g. `1h 2m 3s`
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    pub fn get_last_action(&self) -> Option<LastAction> {
        self.last_action.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
