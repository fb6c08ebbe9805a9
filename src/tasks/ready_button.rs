//! Ready button controller task
//!
//! Keeps a [`ButtonView`] in sync with the room. Room notifications are
//! coalesced into one recomputation per batch; while a countdown is active a
//! one-shot tick re-runs the recomputation on every whole second of the
//! remaining time, without needing a new room update.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::{sync::watch, task::JoinHandle, time::Instant};
use tracing::{debug, info};

use super::{coalescer::UpdateCoalescer, tick::TickScheduler};
use crate::{
    button::{derive, tooltip, ButtonView, Palette},
    state::{
        countdown::CountdownBaseline,
        room_state::{RoomSource, SubscriptionId},
    },
};

/// Inactive ready button, bound to a room source and a palette
pub struct ReadyButton<S: RoomSource> {
    source: Arc<S>,
    palette: Palette,
}

impl<S: RoomSource> ReadyButton<S> {
    pub fn new(source: Arc<S>, palette: Palette) -> Self {
        Self { source, palette }
    }

    /// Subscribe to room changes, compute the initial view and start the
    /// controller task. Must be called from within a tokio runtime.
    pub fn activate(self) -> ActiveReadyButton<S> {
        let coalescer = UpdateCoalescer::new();
        let notifier = coalescer.clone();
        let subscription = self
            .source
            .subscribe(Box::new(move || notifier.notify()));

        let (view_tx, view_rx) = watch::channel(ButtonView::default());
        let recomputations = Arc::new(AtomicU64::new(0));

        let mut controller = Controller {
            source: Arc::clone(&self.source),
            palette: self.palette,
            coalescer,
            baseline: CountdownBaseline::new(Instant::now()),
            ticks: TickScheduler::new(),
            view_tx,
            recomputations: Arc::clone(&recomputations),
        };
        controller.recompute();

        info!("Ready button activated");
        ActiveReadyButton {
            source: self.source,
            subscription: Some(subscription),
            task: Some(tokio::spawn(controller.run())),
            view_rx,
            recomputations,
        }
    }
}

/// Running ready button. Deactivate (or drop) to unsubscribe from the room
/// and cancel any pending countdown tick.
pub struct ActiveReadyButton<S: RoomSource> {
    source: Arc<S>,
    subscription: Option<SubscriptionId>,
    task: Option<JoinHandle<()>>,
    view_rx: watch::Receiver<ButtonView>,
    recomputations: Arc<AtomicU64>,
}

impl<S: RoomSource> ActiveReadyButton<S> {
    /// Receiver following every published view
    pub fn subscribe(&self) -> watch::Receiver<ButtonView> {
        self.view_rx.clone()
    }

    /// Latest published view
    pub fn view(&self) -> ButtonView {
        self.view_rx.borrow().clone()
    }

    /// Number of recomputations run so far, including the initial one
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Unsubscribe and stop the controller. Once this returns no further
    /// recomputation can happen.
    pub async fn deactivate(mut self) {
        self.unsubscribe();
        if let Some(task) = self.task.take() {
            task.abort();
            // Only cancellation is expected here
            let _ = task.await;
        }
        info!("Ready button deactivated");
    }

    fn unsubscribe(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
        }
    }
}

impl<S: RoomSource> Drop for ActiveReadyButton<S> {
    fn drop(&mut self) {
        self.unsubscribe();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// State owned by the controller task
struct Controller<S: RoomSource> {
    source: Arc<S>,
    palette: Palette,
    coalescer: UpdateCoalescer,
    baseline: CountdownBaseline,
    ticks: TickScheduler,
    view_tx: watch::Sender<ButtonView>,
    recomputations: Arc<AtomicU64>,
}

impl<S: RoomSource> Controller<S> {
    async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.coalescer.next_batch() => {
                    debug!("Room updated");
                    self.recompute();
                }
                _ = self.ticks.fired() => {
                    debug!("Countdown tick");
                    self.recompute();
                }
            }
        }
    }

    /// Re-baseline the countdown, re-arm the tick and publish a fresh view
    fn recompute(&mut self) {
        // Everything below reads from this one snapshot
        let room = self.source.room();
        let local_id = self.source.local_user_id();
        let local = room.as_ref().and_then(|r| r.user(local_id).copied());
        let is_host = room.as_ref().is_some_and(|r| r.is_host(local_id));

        let observed = room.as_ref().and_then(|r| r.countdown.as_ref());
        let remaining = self.baseline.reconcile(observed, Instant::now());
        self.ticks.arm(remaining);

        let display = derive(room.as_deref(), local.as_ref(), remaining, is_host);
        let mut view = ButtonView::new(display, &self.palette);
        view.tooltip = tooltip(room.as_deref(), local.as_ref(), is_host).map(str::to_string);
        view.countdown_remaining_seconds = remaining.map(|r| r.as_secs());

        debug!("Button view: {:?} ({:?})", view.text, view.category);
        self.view_tx.send_replace(view);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        button::ColourCategory,
        state::{
            room::{
                CountdownId, CountdownInfo, Participant, ParticipantStatus, RoomSettings, RoomSnapshot,
                UserId,
            },
            room_state::RoomListener,
            RoomState,
        },
    };
    use std::time::Duration;
    use tokio::time::advance;

    const LOCAL: UserId = 1;

    fn room(local_state: ParticipantStatus, host: UserId, countdown: Option<(u64, u64)>) -> RoomSnapshot {
        RoomSnapshot {
            users: vec![
                Participant { user_id: LOCAL, state: local_state },
                Participant { user_id: 2, state: ParticipantStatus::Ready },
                Participant { user_id: 3, state: ParticipantStatus::Idle },
            ],
            host: Some(host),
            countdown: countdown.map(|(id, secs)| CountdownInfo {
                id: CountdownId(id),
                time_remaining: Duration::from_secs(secs),
            }),
            settings: RoomSettings::default(),
        }
    }

    fn activate(state: &Arc<RoomState>) -> ActiveReadyButton<RoomState> {
        ReadyButton::new(Arc::clone(state), Palette::default()).activate()
    }

    /// Let the controller task drain whatever is ready
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_room_shows_ready() {
        let state = Arc::new(RoomState::new(LOCAL));
        let button = activate(&state);

        let view = button.view();
        assert_eq!(view.text, "Ready");
        assert_eq!(view.category, ColourCategory::Ready);
        assert_eq!(view.colours, Palette::default().resolve(ColourCategory::Ready));
        assert_eq!(button.recomputations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_updates_recomputes_once() {
        let state = Arc::new(RoomState::new(LOCAL));
        let button = activate(&state);
        settle().await;

        for _ in 0..5 {
            state.replace(Some(room(ParticipantStatus::Idle, 2, None)));
        }
        state.replace(Some(room(ParticipantStatus::Ready, 2, None)));
        settle().await;

        assert_eq!(button.recomputations(), 2);
        let view = button.view();
        assert_eq!(view.text, "Waiting for host... (2 / 3 ready)");
        assert_eq!(view.category, ColourCategory::Pending);

        settle().await;
        assert_eq!(button.recomputations(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_ticks_without_room_updates() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Idle, 2, Some((1, 65)))));
        let button = activate(&state);

        assert_eq!(button.view().text, "Ready (starting in 01:05)");
        assert_eq!(button.view().category, ColourCategory::Ready);

        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(button.view().text, "Ready (starting in 01:04)");

        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(button.view().text, "Ready (starting in 01:03)");
        assert_eq!(button.view().countdown_remaining_seconds, Some(63));
        assert_eq!(button.recomputations(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn whole_second_countdown_shows_every_second() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Idle, 2, Some((1, 65)))));
        let button = activate(&state);

        // Coarse steps land after each boundary instead of exactly on it
        let mut seen = vec![button.view().text];
        for _ in 0..12 {
            advance(Duration::from_millis(300)).await;
            settle().await;
            let text = button.view().text;
            if seen.last() != Some(&text) {
                seen.push(text);
            }
        }

        assert_eq!(
            seen,
            [
                "Ready (starting in 01:05)",
                "Ready (starting in 01:04)",
                "Ready (starting in 01:03)",
                "Ready (starting in 01:02)",
                "Ready (starting in 01:01)",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_just_past_whole_second() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Idle, 2, Some((1, 65)))));
        let button = activate(&state);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(button.view().text, "Ready (starting in 01:04)");
        assert_eq!(button.recomputations(), 2);
    }

    /// Source whose convenience lookups answer for a different room than
    /// the one `room()` returns
    struct DisagreeingSource(RoomState);

    impl RoomSource for DisagreeingSource {
        fn subscribe(&self, listener: RoomListener) -> SubscriptionId {
            self.0.subscribe(listener)
        }

        fn unsubscribe(&self, id: SubscriptionId) {
            self.0.unsubscribe(id)
        }

        fn room(&self) -> Option<Arc<RoomSnapshot>> {
            self.0.room()
        }

        fn local_user_id(&self) -> UserId {
            self.0.local_user_id()
        }

        fn local_user(&self) -> Option<Participant> {
            Some(Participant { user_id: LOCAL, state: ParticipantStatus::Idle })
        }

        fn is_host(&self) -> bool {
            true
        }
    }

    #[tokio::test(start_paused = true)]
    async fn view_is_derived_from_a_single_snapshot() {
        let source = Arc::new(DisagreeingSource(RoomState::new(LOCAL)));
        source.0.replace(Some(room(ParticipantStatus::Ready, 2, None)));
        let button = ReadyButton::new(Arc::clone(&source), Palette::default()).activate();

        let view = button.view();
        assert_eq!(view.text, "Waiting for host... (2 / 3 ready)");
        assert_eq!(view.category, ColourCategory::Pending);

        source.0.replace(Some(room(ParticipantStatus::Ready, LOCAL, None)));
        settle().await;
        assert_eq!(button.view().text, "Start match (2 / 3 ready)");
    }

    #[tokio::test(start_paused = true)]
    async fn new_countdown_identity_rebaselines() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Ready, 2, Some((1, 30)))));
        let button = activate(&state);

        advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(button.view().text, "Starting in 00:20 (2 / 3 ready)");

        // Same countdown pushed again keeps counting from the old baseline
        state.replace(Some(room(ParticipantStatus::Ready, 2, Some((1, 30)))));
        settle().await;
        assert_eq!(button.view().text, "Starting in 00:20 (2 / 3 ready)");

        state.replace(Some(room(ParticipantStatus::Ready, 2, Some((2, 90)))));
        settle().await;
        assert_eq!(button.view().text, "Starting in 01:30 (2 / 3 ready)");
        assert_eq!(button.view().category, ColourCategory::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_countdown_stops_ticking() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Ready, LOCAL, Some((1, 30)))));
        let button = activate(&state);
        assert_eq!(button.view().tooltip.as_deref(), Some("Cancel countdown"));

        state.replace(Some(room(ParticipantStatus::Ready, LOCAL, None)));
        settle().await;
        let view = button.view();
        assert_eq!(view.text, "Start match (2 / 3 ready)");
        assert_eq!(view.category, ColourCategory::Ready);
        assert_eq!(view.tooltip, None);
        assert_eq!(view.countdown_remaining_seconds, None);

        let before = button.recomputations();
        advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(button.recomputations(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_countdown_holds_at_zero() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Idle, 2, Some((1, 2)))));
        let button = activate(&state);

        for _ in 0..4 {
            advance(Duration::from_secs(1)).await;
            settle().await;
        }
        assert_eq!(button.view().text, "Ready (starting in 00:00)");
        assert_eq!(button.view().countdown_remaining_seconds, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn deactivate_stops_all_recomputation() {
        let state = Arc::new(RoomState::new(LOCAL));
        state.replace(Some(room(ParticipantStatus::Idle, 2, Some((1, 30)))));
        let button = activate(&state);
        let view_rx = button.subscribe();
        assert_eq!(state.listener_count(), 1);

        button.deactivate().await;
        assert_eq!(state.listener_count(), 0);

        state.replace(Some(room(ParticipantStatus::Ready, 2, None)));
        advance(Duration::from_secs(3)).await;
        settle().await;

        assert_eq!(view_rx.borrow().text, "Ready (starting in 00:30)");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_unsubscribes() {
        let state = Arc::new(RoomState::new(LOCAL));
        let button = activate(&state);
        assert_eq!(state.listener_count(), 1);

        drop(button);
        assert_eq!(state.listener_count(), 0);
    }
}
