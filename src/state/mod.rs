//! State management module
//!
//! Room snapshots, the room snapshot cache, the local countdown baseline and
//! the state shared with the HTTP layer.

pub mod app_state;
pub mod countdown;
pub mod room;
pub mod room_state;

// Re-export main types
pub use app_state::{AppState, LastAction};
pub use countdown::CountdownBaseline;
pub use room::{CountdownId, CountdownInfo, Participant, ParticipantStatus, RoomSettings, RoomSnapshot, UserId};
pub use room_state::{RoomListener, RoomSource, RoomState, SubscriptionId};
