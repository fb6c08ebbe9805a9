//! Countdown display tick, aligned to whole seconds of remaining time

use std::{future, pin::Pin, time::Duration};
use tokio::time::{sleep_until, Instant, Sleep};
use tracing::debug;

const SECOND_MS: u128 = 1000;

/// Holds at most one pending one-shot tick
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<Pin<Box<Sleep>>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending tick with one firing at the next whole second of
    /// `remaining`. With no remaining time the pending tick is only cancelled.
    ///
    /// Returns the delay that was armed.
    pub fn arm(&mut self, remaining: Option<Duration>) -> Option<Duration> {
        self.cancel();

        let delay = delay_to_next_second(remaining?);
        debug!("Next countdown tick in {}ms", delay.as_millis());
        self.pending = Some(Box::pin(sleep_until(Instant::now() + delay)));
        Some(delay)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|sleep| sleep.deadline())
    }

    /// Resolve once the armed tick elapses, disarming it. Never resolves
    /// while nothing is armed.
    pub async fn fired(&mut self) {
        match self.pending.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.pending = None;
            }
            None => future::pending().await,
        }
    }
}

/// Time until `remaining` has just crossed its next whole second, so the
/// truncated `mm:ss` text has already moved on when the tick runs. An expired
/// countdown has no boundary left and is refreshed once a second.
pub fn delay_to_next_second(remaining: Duration) -> Duration {
    if remaining.is_zero() {
        return Duration::from_millis(SECOND_MS as u64);
    }
    Duration::from_millis((remaining.as_millis() % SECOND_MS) as u64 + 1)
}
