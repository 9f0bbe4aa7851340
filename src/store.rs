//! # Module: User Store
//!
//! ## Responsibility
//! Holds the authoritative in-memory list of users and the id counter, and
//! broadcasts the full snapshot to every subscriber after each mutation.
//!
//! ## Guarantees
//! - Ids start at 1, are strictly increasing and never reused
//! - Snapshots are immutable; mutation replaces the whole list
//! - Every mutation broadcasts exactly one snapshot, in call order
//! - A new subscription replays the current snapshot first
//!
//! ## NOT Responsible For
//! - Field validation (callers pass pre-validated fields)
//! - Persistence (state lives for the process lifetime only)

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::model::{User, UserFields, UserId};

/// Number of snapshots a subscriber may fall behind before it skips ahead.
pub const SNAPSHOT_BUFFER: usize = 64;

/// Full ordered list of users at a point in time.
pub type Snapshot = Arc<[User]>;

/// Result of [`UserStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A record with the id existed and was replaced.
    Applied,
    /// No record had the id; the snapshot was re-broadcast unchanged.
    NotFound,
}

/// Reactive in-memory user store.
///
/// # Panics
///
/// This type never panics.
#[derive(Debug)]
pub struct UserStore {
    users: Snapshot,
    next_id: u64,
    tx: broadcast::Sender<Snapshot>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Creates an empty store. The first added user gets id 1.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SNAPSHOT_BUFFER);
        Self {
            users: Arc::from(Vec::new()),
            next_id: 1,
            tx,
        }
    }

    /// Returns the current snapshot without subscribing.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.users)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Looks up a user by id in the current snapshot.
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Appends a new user with the next sequential id and broadcasts.
    ///
    /// # Returns
    /// The id assigned to the new record.
    pub fn add(&mut self, fields: UserFields) -> UserId {
        let id = UserId(self.next_id);
        self.next_id += 1;

        let mut next = Vec::with_capacity(self.users.len() + 1);
        next.extend(self.users.iter().cloned());
        next.push(User::from_fields(id, fields));

        info!(id = id.get(), total = next.len(), "user added");
        self.publish(next.into());
        id
    }

    /// Replaces the record with `id` by `{id, fields}` and broadcasts.
    ///
    /// An unknown id leaves the records untouched but still broadcasts the
    /// unchanged snapshot, so subscribers observe one emission per call.
    pub fn update(&mut self, id: UserId, fields: UserFields) -> UpdateOutcome {
        if self.get(id).is_none() {
            warn!(id = id.get(), "update for unknown user id ignored");
            self.publish(Arc::clone(&self.users));
            return UpdateOutcome::NotFound;
        }

        let next: Vec<User> = self
            .users
            .iter()
            .map(|u| {
                if u.id == id {
                    User::from_fields(id, fields.clone())
                } else {
                    u.clone()
                }
            })
            .collect();

        info!(id = id.get(), "user updated");
        self.publish(next.into());
        UpdateOutcome::Applied
    }

    /// Opens a subscription that yields the current snapshot first, then the
    /// snapshot after every subsequent mutation. Dropping it unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        debug!(subscribers = self.tx.receiver_count() + 1, "store subscription opened");
        Subscription {
            replay: Some(self.snapshot()),
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn publish(&mut self, snapshot: Snapshot) {
        self.users = Arc::clone(&snapshot);
        // Sending only fails when nobody is subscribed, which is not an error.
        let _ = self.tx.send(snapshot);
    }
}

/// A live view of the store's broadcast stream.
#[derive(Debug)]
pub struct Subscription {
    replay: Option<Snapshot>,
    rx: broadcast::Receiver<Snapshot>,
}

impl Subscription {
    /// Returns the next pending snapshot, or `None` if nothing new arrived.
    ///
    /// A subscriber that fell more than [`SNAPSHOT_BUFFER`] snapshots behind
    /// skips to the oldest retained one; snapshots carry full state so the
    /// newest still reflects every mutation.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        if let Some(snapshot) = self.replay.take() {
            return Some(snapshot);
        }
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "store subscriber lagged, skipping ahead");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drains all pending snapshots and returns the newest, if any.
    pub fn latest(&mut self) -> Option<Snapshot> {
        let mut latest = None;
        while let Some(snapshot) = self.try_next() {
            latest = Some(snapshot);
        }
        latest
    }
}
