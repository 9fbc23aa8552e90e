//! Generational handles to pooled items.

use std::fmt;

/// Handle to an item leased from an [`ObjectPool`](super::ObjectPool).
///
/// A handle names a slot and the lease it was issued for. Each `get` starts
/// a new lease, so a handle kept after its item was returned or recycled no
/// longer resolves and is rejected by `return_to_pool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

impl PoolHandle {
    /// `index` is below `max_pool_size`, which config validation caps at
    /// [`MAX_POOL_SIZE`](super::config::MAX_POOL_SIZE).
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        debug_assert!(index < super::config::MAX_POOL_SIZE);
        Self {
            index: index as u32,
            generation,
        }
    }

    /// Slot index. Stable for the lifetime of the underlying item.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Lease generation. Zero means the item has never been handed out.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}
