//! Local countdown baseline

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::room::{CountdownId, CountdownInfo};

/// Tracks which countdown was last seen and when it was first seen, so the
/// remaining time can be computed locally between room updates.
///
/// The baseline instant moves only when the countdown identity changes,
/// including transitions to and from "no countdown".
#[derive(Debug, Clone)]
pub struct CountdownBaseline {
    last_seen: Option<CountdownId>,
    reference: Duration,
    changed_at: Instant,
}

impl CountdownBaseline {
    /// Create a baseline with no countdown seen yet
    pub fn new(now: Instant) -> Self {
        Self {
            last_seen: None,
            reference: Duration::ZERO,
            changed_at: now,
        }
    }

    pub fn last_seen(&self) -> Option<CountdownId> {
        self.last_seen
    }

    pub fn changed_at(&self) -> Instant {
        self.changed_at
    }

    /// Reconcile against the countdown in the latest snapshot and return the
    /// remaining time, `None` when no countdown is active
    pub fn reconcile(&mut self, observed: Option<&CountdownInfo>, now: Instant) -> Option<Duration> {
        let observed_id = observed.map(|c| c.id);

        if observed_id != self.last_seen {
            debug!("Countdown changed: {:?} -> {:?}", self.last_seen, observed_id);
            self.last_seen = observed_id;
            self.reference = observed.map_or(Duration::ZERO, |c| c.time_remaining);
            self.changed_at = now;
        }

        self.remaining(now)
    }

    /// Remaining time of the tracked countdown, never negative
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_seen?;
        let elapsed = now.saturating_duration_since(self.changed_at);
        Some(self.reference.saturating_sub(elapsed))
    }
}
