//! Pool notifications and counters.

use super::handle::PoolHandle;
use serde::{Deserialize, Serialize};

/// Callback receiving every [`PoolEvent`].
pub type PoolListener = Box<dyn FnMut(&PoolEvent)>;

/// Something observable happened to one or more pooled items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// An item was handed out. `created` is set when the pool had to build
    /// it on demand.
    Pooled { handle: PoolHandle, created: bool },

    /// An item came back through `return_to_pool`.
    Returned { handle: PoolHandle },

    /// The oldest active item was reclaimed to satisfy a `get`. `handle` is
    /// the lease that was cut short.
    Recycled { handle: PoolHandle },

    /// A batched prewarm pass finished. Carries the whole ready set.
    PrewarmCompleted { handles: Vec<PoolHandle> },
}

/// Running totals kept by a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Items built by the factory
    pub created: u64,
    /// Successful `get` calls
    pub pooled: u64,
    /// Successful `return_to_pool` calls
    pub returned: u64,
    /// Forced reclamations of the oldest active item
    pub recycled: u64,
    /// `get` calls that produced no item
    pub exhausted: u64,
}
