//! Text, colour and tooltip derivation for the ready button
//!
//! Everything here is a pure function of the room snapshot, the local user
//! and the locally computed countdown remaining time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    state::room::{Participant, ParticipantStatus, RoomSnapshot},
    utils::format_mm_ss,
};

/// Tooltip shown to a host who can cancel a running countdown
pub const CANCEL_COUNTDOWN_TOOLTIP: &str = "Cancel countdown";

/// Colour category of the button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourCategory {
    /// Green: pressing the button makes progress
    Ready,
    /// Yellow: waiting on someone else or on the countdown
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDisplay {
    pub text: String,
    pub colour: ColourCategory,
}

/// Local user's position relative to the next match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stance {
    /// Not ready yet, or no local user record
    Undecided,
    /// Ready or spectating
    Committed,
}

impl Stance {
    fn of(local: Option<&Participant>) -> Self {
        match local.map(|u| u.state) {
            Some(state) if state.is_committed() => Self::Committed,
            _ => Self::Undecided,
        }
    }
}

/// Derive button text and colour.
///
/// `countdown` is the locally computed remaining time of the active
/// countdown, `None` when there is none.
pub fn derive(
    room: Option<&RoomSnapshot>,
    local: Option<&Participant>,
    countdown: Option<Duration>,
    is_host: bool,
) -> DerivedDisplay {
    let Some(room) = room else {
        return DerivedDisplay {
            text: "Ready".to_string(),
            colour: ColourCategory::Ready,
        };
    };

    let stance = Stance::of(local);
    let count_text = format!("({} / {} ready)", room.ready_count(), room.playing_count());

    let text = match (countdown, stance, is_host) {
        (Some(remaining), Stance::Undecided, _) => {
            format!("Ready ({})", countdown_text(remaining).to_lowercase())
        }
        (Some(remaining), Stance::Committed, _) => {
            format!("{} {}", countdown_text(remaining), count_text)
        }
        (None, Stance::Undecided, _) => "Ready".to_string(),
        (None, Stance::Committed, true) => format!("Start match {count_text}"),
        (None, Stance::Committed, false) => format!("Waiting for host... {count_text}"),
    };

    let colour = match (stance, is_host, countdown.is_some()) {
        (Stance::Undecided, _, _) => ColourCategory::Ready,
        (Stance::Committed, true, false) => ColourCategory::Ready,
        (Stance::Committed, false, _) | (Stance::Committed, true, true) => ColourCategory::Pending,
    };

    DerivedDisplay { text, colour }
}

/// Tooltip override; `None` leaves the control's default tooltip in place
pub fn tooltip(room: Option<&RoomSnapshot>, local: Option<&Participant>, is_host: bool) -> Option<&'static str> {
    let room = room?;
    let local_ready = local.is_some_and(|u| u.state == ParticipantStatus::Ready);

    (room.countdown.is_some() && is_host && local_ready && !room.settings.auto_start_enabled)
        .then_some(CANCEL_COUNTDOWN_TOOLTIP)
}

fn countdown_text(remaining: Duration) -> String {
    format!("Starting in {}", format_mm_ss(remaining))
}
