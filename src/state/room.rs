//! Room snapshot structures as pushed by the room authority

use std::{collections::HashSet, time::Duration};

use serde::{Deserialize, Serialize};

use crate::utils::duration::millis;

/// Identifier of a user within a room
pub type UserId = u64;

/// Opaque identity of one countdown instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountdownId(pub u64);

/// Per-user state inside a multiplayer room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Idle,
    Ready,
    WaitingForLoad,
    Loaded,
    ReadyForGameplay,
    Playing,
    FinishedPlay,
    Results,
    Spectating,
}

impl ParticipantStatus {
    /// Ready and spectating users have already committed to the next match
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Ready | Self::Spectating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    #[serde(default)]
    pub state: ParticipantStatus,
}

/// Server-driven match start countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownInfo {
    pub id: CountdownId,
    /// Time remaining at the moment the snapshot was observed
    #[serde(rename = "time_remaining_ms", with = "millis")]
    pub time_remaining: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSettings {
    #[serde(default)]
    pub auto_start_enabled: bool,
}

/// Full room state at a point in time. Always replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub users: Vec<Participant>,
    #[serde(default)]
    pub host: Option<UserId>,
    #[serde(default)]
    pub countdown: Option<CountdownInfo>,
    #[serde(default)]
    pub settings: RoomSettings,
}

impl RoomSnapshot {
    pub fn user(&self, user_id: UserId) -> Option<&Participant> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    pub fn is_host(&self, user_id: UserId) -> bool {
        self.host == Some(user_id)
    }

    /// Reject snapshots listing the same user twice
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for user in &self.users {
            if !seen.insert(user.user_id) {
                return Err(format!("User {} appears more than once in the room", user.user_id));
            }
        }
        Ok(())
    }

    /// Number of users marked ready
    pub fn ready_count(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.state == ParticipantStatus::Ready)
            .count()
    }

    /// Number of users taking part, i.e. everyone but spectators
    pub fn playing_count(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.state != ParticipantStatus::Spectating)
            .count()
    }
}
