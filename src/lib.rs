//! Ready Room - ready/start-match button state for multiplayer rooms
//!
//! This library keeps a ready button's text, colour and tooltip in sync with
//! a pushed room snapshot, refreshing the match start countdown locally once
//! per second without further room updates.

pub mod api;
pub mod button;
pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use button::{ButtonView, Palette};
pub use config::Config;
pub use state::{AppState, RoomSource, RoomState};
pub use tasks::{ActiveReadyButton, ReadyButton};
pub use utils::signals::{shutdown_signal, until_shutdown};
