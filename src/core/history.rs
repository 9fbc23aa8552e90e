//! State change history tracking.
//!
//! Records every committed state change of a machine, including the initial
//! `set_state`, in the order they happened.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed state change.
///
/// `from` is `None` when the change was the machine's first `set_state`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateChange<K: StateId> {
    /// The state being left, if any
    pub from: Option<K>,
    /// The state that became current
    pub to: K,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
    /// Value of the machine's update tick counter at the time of the change
    pub tick: u64,
}

/// Ordered history of state changes.
///
/// A history may carry a retention limit; once full, the oldest entries are
/// dropped first.
///
/// # Example
///
/// ```rust
/// use tickkit::core::{StateChange, StateHistory, StateId};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Phase { Idle, Patrol }
///
/// impl StateId for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Patrol => "Patrol",
///         }
///     }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(StateChange { from: None, to: Phase::Idle, timestamp: Utc::now(), tick: 0 });
/// history.record(StateChange { from: Some(Phase::Idle), to: Phase::Patrol, timestamp: Utc::now(), tick: 4 });
///
/// assert_eq!(history.path(), vec![&Phase::Idle, &Phase::Patrol]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", from = "StoredHistory<K>")]
pub struct StateHistory<K: StateId> {
    changes: VecDeque<StateChange<K>>,
    limit: Option<usize>,
}

/// Wire form of [`StateHistory`]; the limit is applied on the way in.
#[derive(Deserialize)]
#[serde(bound = "")]
struct StoredHistory<K: StateId> {
    changes: VecDeque<StateChange<K>>,
    limit: Option<usize>,
}

impl<K: StateId> From<StoredHistory<K>> for StateHistory<K> {
    fn from(stored: StoredHistory<K>) -> Self {
        let mut history = Self {
            changes: stored.changes,
            limit: stored.limit,
        };
        history.trim();
        history
    }
}

impl<K: StateId> Default for StateHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateId> StateHistory<K> {
    /// Create an unbounded, empty history.
    pub fn new() -> Self {
        Self {
            changes: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` entries.
    ///
    /// A limit of zero disables recording entirely.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    /// Append a change, evicting the oldest entries past the limit.
    pub fn record(&mut self, change: StateChange<K>) {
        if self.limit == Some(0) {
            return;
        }
        self.changes.push_back(change);
        self.trim();
    }

    /// States traversed, oldest first.
    ///
    /// Starts with the `from` of the oldest retained change when it has one,
    /// followed by the `to` of every change.
    pub fn path(&self) -> Vec<&K> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(from) = self.changes.front().and_then(|c| c.from.as_ref()) {
            path.push(from);
        }
        path.extend(self.changes.iter().map(|c| &c.to));
        path
    }

    /// Time between the oldest and newest retained change.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent change, if any.
    pub fn last(&self) -> Option<&StateChange<K>> {
        self.changes.back()
    }

    /// Retained changes, oldest first.
    pub fn changes(&self) -> impl Iterator<Item = &StateChange<K>> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.changes.len() > limit {
                self.changes.pop_front();
            }
        }
    }
}
