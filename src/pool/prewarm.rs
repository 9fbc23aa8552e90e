//! Resumable, batched activation pass over freshly prewarmed items.
//!
//! Some resources only finish initializing the first time they are shown.
//! A prewarm pass forces that ahead of real demand: each batch is activated
//! on one step and deactivated on the next, so the cost is spread over
//! several ticks. The host drives the cursor; nothing runs in the
//! background.

use super::event::PoolEvent;
use super::handle::PoolHandle;
use super::object_pool::ObjectPool;
use super::poolable::Poolable;
use tracing::debug;

/// Outcome of one [`PrewarmCursor::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrewarmStep {
    /// More steps are needed.
    Pending,
    /// The pass is over and `PrewarmCompleted` has been emitted.
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Activate,
    Deactivate,
    Done,
}

/// Cursor over a prewarm activation pass, created by
/// [`ObjectPool::prewarm_batched`].
///
/// The set of items is fixed when the cursor is created. Items handed out by
/// `get` between steps are skipped: only items still in the ready queue are
/// toggled.
#[derive(Clone, Debug)]
pub struct PrewarmCursor {
    snapshot: Vec<PoolHandle>,
    batch_size: usize,
    next: usize,
    phase: Phase,
}

impl PrewarmCursor {
    pub(crate) fn new(snapshot: Vec<PoolHandle>, batch_size: usize) -> Self {
        Self {
            snapshot,
            batch_size: batch_size.max(1),
            next: 0,
            phase: Phase::Activate,
        }
    }

    /// Advance the pass by one phase of one batch.
    pub fn step<T: Poolable>(&mut self, pool: &mut ObjectPool<T>) -> PrewarmStep {
        match self.phase {
            Phase::Done => PrewarmStep::Complete,
            Phase::Activate => {
                if self.next >= self.snapshot.len() {
                    return self.finish(pool);
                }
                for &handle in self.current_batch() {
                    pool.warm(handle, true);
                }
                self.phase = Phase::Deactivate;
                PrewarmStep::Pending
            }
            Phase::Deactivate => {
                for &handle in self.current_batch() {
                    pool.warm(handle, false);
                }
                self.next = self.batch_end();
                self.phase = Phase::Activate;
                if self.next >= self.snapshot.len() {
                    self.finish(pool)
                } else {
                    PrewarmStep::Pending
                }
            }
        }
    }

    /// Step until the pass completes. Returns the number of steps taken.
    pub fn run_to_completion<T: Poolable>(&mut self, pool: &mut ObjectPool<T>) -> usize {
        let mut steps = 0;
        while self.step(pool) == PrewarmStep::Pending {
            steps += 1;
        }
        steps + 1
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Items fully processed so far, out of the snapshot size.
    pub fn progress(&self) -> (usize, usize) {
        (self.next, self.snapshot.len())
    }

    /// Items covered by this pass.
    pub fn handles(&self) -> &[PoolHandle] {
        &self.snapshot
    }

    fn batch_end(&self) -> usize {
        (self.next + self.batch_size).min(self.snapshot.len())
    }

    fn current_batch(&self) -> &[PoolHandle] {
        &self.snapshot[self.next..self.batch_end()]
    }

    fn finish<T: Poolable>(&mut self, pool: &mut ObjectPool<T>) -> PrewarmStep {
        self.phase = Phase::Done;
        let handles: Vec<PoolHandle> = pool.ready_handles().collect();
        debug!(
            warmed = self.snapshot.len(),
            ready = handles.len(),
            "prewarm pass completed"
        );
        pool.emit(PoolEvent::PrewarmCompleted { handles });
        PrewarmStep::Complete
    }
}
