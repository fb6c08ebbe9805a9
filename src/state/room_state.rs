//! Latest known room snapshot and room change subscriptions

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, RwLock,
    },
};
use tracing::debug;

use super::room::{Participant, RoomSnapshot, UserId};

/// Callback invoked whenever the room snapshot is replaced
pub type RoomListener = Box<dyn Fn() + Send + Sync>;

/// Handle returned by [`RoomSource::subscribe`], needed to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Read side of the room as seen by room-bound components.
///
/// Listeners are invoked on whichever thread pushed the change and must only
/// hand the notification off; they must not call back into the source.
pub trait RoomSource: Send + Sync + 'static {
    fn subscribe(&self, listener: RoomListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);

    /// Current room, `None` when not in a room
    fn room(&self) -> Option<Arc<RoomSnapshot>>;

    /// Id of the user this client plays as
    fn local_user_id(&self) -> UserId;

    /// Local user's record within the current room
    fn local_user(&self) -> Option<Participant> {
        let id = self.local_user_id();
        self.room().and_then(|room| room.user(id).copied())
    }

    /// Whether the local user hosts the current room
    fn is_host(&self) -> bool {
        let id = self.local_user_id();
        self.room().is_some_and(|room| room.is_host(id))
    }
}

/// Room snapshot cache. The room authority replaces the snapshot through
/// [`RoomState::replace`]; readers only ever see whole snapshots.
pub struct RoomState {
    local_user_id: UserId,
    snapshot: RwLock<Option<Arc<RoomSnapshot>>>,
    listeners: Mutex<BTreeMap<SubscriptionId, RoomListener>>,
    next_subscription: AtomicU64,
}

impl RoomState {
    /// Create an empty cache for the given local user
    pub fn new(local_user_id: UserId) -> Self {
        Self {
            local_user_id,
            snapshot: RwLock::new(None),
            listeners: Mutex::new(BTreeMap::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Replace the current snapshot and notify every listener
    pub fn replace(&self, snapshot: Option<RoomSnapshot>) {
        let snapshot = snapshot.map(Arc::new);
        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = snapshot;

        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        debug!("Room replaced, notifying {} listener(s)", listeners.len());
        for listener in listeners.values() {
            listener();
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl fmt::Debug for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomState")
            .field("local_user_id", &self.local_user_id)
            .field("snapshot", &self.room())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl RoomSource for RoomState {
    fn subscribe(&self, listener: RoomListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
    }

    fn room(&self) -> Option<Arc<RoomSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn local_user_id(&self) -> UserId {
        self.local_user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::room::ParticipantStatus;

    fn room_with_host(host: UserId) -> RoomSnapshot {
        RoomSnapshot {
            users: vec![
                Participant { user_id: 1, state: ParticipantStatus::Ready },
                Participant { user_id: 2, state: ParticipantStatus::Idle },
            ],
            host: Some(host),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_local_user_and_host() {
        let state = RoomState::new(1);
        assert!(state.room().is_none());
        assert!(state.local_user().is_none());
        assert!(!state.is_host());

        state.replace(Some(room_with_host(1)));
        assert_eq!(state.local_user().map(|u| u.state), Some(ParticipantStatus::Ready));
        assert!(state.is_host());

        state.replace(Some(room_with_host(2)));
        assert!(!state.is_host());
    }

    #[test]
    fn replace_notifies_until_unsubscribed() {
        let state = RoomState::new(1);
        let calls = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&calls);
        let id = state.subscribe(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        state.replace(Some(room_with_host(1)));
        state.replace(None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        state.unsubscribe(id);
        assert_eq!(state.listener_count(), 0);
        state.replace(Some(room_with_host(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn snapshots_are_replaced_not_mutated() {
        let state = RoomState::new(1);
        state.replace(Some(room_with_host(1)));
        let before = state.room().unwrap();

        state.replace(Some(room_with_host(2)));
        assert!(before.is_host(1));
        assert!(state.room().unwrap().is_host(2));
    }
}
