//! Bounded object pool with FIFO recycling.

use super::config::PoolConfig;
use super::error::PoolError;
use super::event::{PoolEvent, PoolListener, PoolStats};
use super::handle::PoolHandle;
use super::poolable::{Placeable, Poolable};
use super::prewarm::PrewarmCursor;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Factory used to build new items on demand.
pub type Factory<T> = Box<dyn FnMut() -> T>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotStatus {
    Ready,
    Active,
}

/// A slot owns one item for the whole life of the pool.
struct Slot<T> {
    item: T,
    generation: u32,
    status: SlotStatus,
}

/// Bounded pool of reusable items.
///
/// Items live in slots owned by the pool and are reached through
/// [`PoolHandle`]s. Every slot is either in the ready queue (inactive,
/// available) or in the active queue (handed out, ordered by acquisition).
/// `ready + active` never exceeds `max_pool_size`.
///
/// When `get` finds no ready item and no capacity left, and recycling is
/// allowed, the item that has been active longest is reclaimed and handed
/// out again. Handles from its previous lease go stale.
///
/// # Example
///
/// ```rust
/// use tickkit::pool::{ObjectPool, PoolConfig, Poolable};
///
/// #[derive(Default)]
/// struct Bullet {
///     visible: bool,
/// }
///
/// impl Poolable for Bullet {
///     fn set_active(&mut self, active: bool) {
///         self.visible = active;
///     }
/// }
///
/// let config = PoolConfig::default().with_max_pool_size(2).with_prewarm_count(1);
/// let mut pool = ObjectPool::new(config, Bullet::default)?;
/// assert_eq!(pool.ready_count(), 1);
///
/// let first = pool.get()?;
/// assert!(pool.item(first).is_some_and(|b| b.visible));
///
/// pool.return_to_pool(first)?;
/// assert_eq!(pool.active_count(), 0);
/// # Ok::<(), tickkit::pool::PoolError>(())
/// ```
pub struct ObjectPool<T: Poolable> {
    config: PoolConfig,
    factory: Factory<T>,
    slots: Vec<Slot<T>>,
    ready: VecDeque<usize>,
    active: VecDeque<usize>,
    listeners: Vec<PoolListener>,
    stats: PoolStats,
}

impl<T: Poolable> ObjectPool<T> {
    /// Validate `config`, build the pool and create `prewarm_count` items.
    pub fn new<F>(config: PoolConfig, factory: F) -> Result<Self, PoolError>
    where
        F: FnMut() -> T + 'static,
    {
        config.check()?;
        let prewarm = config.prewarm_count;
        let mut pool = Self {
            slots: Vec::with_capacity(config.max_pool_size.min(1024)),
            ready: VecDeque::new(),
            active: VecDeque::new(),
            listeners: Vec::new(),
            stats: PoolStats::default(),
            factory: Box::new(factory),
            config,
        };
        pool.prewarm(prewarm);
        Ok(pool)
    }

    /// Create up to `count` items, bounded by the remaining capacity, and
    /// park them as ready. Returns how many were created.
    pub fn prewarm(&mut self, count: usize) -> usize {
        self.grow(count).len()
    }

    /// Like [`prewarm`](Self::prewarm), followed by an activation pass run in
    /// batches of `activation_batch_size`.
    ///
    /// The returned cursor must be stepped against this same pool, usually
    /// once per tick. `get` and `return_to_pool` may be called between steps.
    pub fn prewarm_batched(&mut self, count: usize) -> PrewarmCursor {
        let created = self.grow(count);
        PrewarmCursor::new(created, self.config.activation_batch_size)
    }

    /// Hand out an item.
    ///
    /// Takes the oldest ready item, else builds a new one if capacity
    /// remains, else recycles the oldest active item if allowed. Fails with
    /// [`PoolError::Exhausted`] otherwise, leaving both queues untouched.
    pub fn get(&mut self) -> Result<PoolHandle, PoolError> {
        let (index, created) = self.next_ready()?;
        Ok(self.lease(index, created, |_| {}))
    }

    /// [`get`](Self::get), placing the item before it is activated.
    pub fn get_at(&mut self, placement: T::Placement) -> Result<PoolHandle, PoolError>
    where
        T: Placeable,
    {
        let (index, created) = self.next_ready()?;
        Ok(self.lease(index, created, move |item| item.place(placement)))
    }

    /// Deactivate an item and put it back in the ready queue.
    ///
    /// Handles from an earlier lease are rejected with
    /// [`PoolError::StaleHandle`]; returning the same handle twice yields
    /// [`PoolError::NotActive`]. Rejected returns change nothing.
    pub fn return_to_pool(&mut self, handle: PoolHandle) -> Result<(), PoolError> {
        if let Err(err) = self.check_active(handle) {
            warn!(%handle, error = %err, "rejected pool return");
            return Err(err);
        }

        let index = handle.index();
        if let Some(position) = self.active.iter().position(|&i| i == index) {
            self.active.remove(position);
        }
        let slot = &mut self.slots[index];
        slot.status = SlotStatus::Ready;
        slot.item.set_active(false);
        slot.item.on_returned();
        self.ready.push_back(index);
        self.stats.returned += 1;

        trace!(%handle, "item returned");
        self.emit(PoolEvent::Returned { handle });
        Ok(())
    }

    /// Register a listener for every [`PoolEvent`].
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PoolEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Item behind a handle, provided the handle's lease is current.
    pub fn item(&self, handle: PoolHandle) -> Option<&T> {
        self.slot(handle).map(|slot| &slot.item)
    }

    pub fn item_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .map(|slot| &mut slot.item)
    }

    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.slot(handle)
            .is_some_and(|slot| slot.status == SlotStatus::Active)
    }

    pub fn is_ready(&self, handle: PoolHandle) -> bool {
        self.slot(handle)
            .is_some_and(|slot| slot.status == SlotStatus::Ready)
    }

    /// Active items, oldest acquisition first.
    pub fn active_handles(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.active.iter().map(|&index| self.handle_for(index))
    }

    /// Ready items in the order `get` will hand them out.
    pub fn ready_handles(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.ready.iter().map(|&index| self.handle_for(index))
    }

    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Items created so far, ready and active together.
    pub fn total_count(&self) -> usize {
        self.ready.len() + self.active.len()
    }

    /// How many more items the pool may create.
    pub fn available_slots(&self) -> usize {
        self.config.max_pool_size.saturating_sub(self.total_count())
    }

    pub fn capacity(&self) -> usize {
        self.config.max_pool_size
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Toggle a ready item during a prewarm pass. Returns false, touching
    /// nothing, when the handle no longer names a ready item.
    pub(crate) fn warm(&mut self, handle: PoolHandle, active: bool) -> bool {
        if !self.is_ready(handle) {
            return false;
        }
        self.slots[handle.index()].item.set_active(active);
        true
    }

    pub(crate) fn emit(&mut self, event: PoolEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn grow(&mut self, count: usize) -> Vec<PoolHandle> {
        let count = count.min(self.available_slots());
        let created: Vec<PoolHandle> = (0..count).map(|_| self.create()).collect();
        if count > 0 {
            debug!(
                created = count,
                total = self.total_count(),
                capacity = self.capacity(),
                "pool prewarmed"
            );
        }
        created
    }

    /// Build one item and park it, inactive, at the back of the ready queue.
    fn create(&mut self) -> PoolHandle {
        let mut item = (self.factory)();
        if self.config.awake_on_creation {
            item.set_active(true);
        }
        item.set_active(false);

        let index = self.slots.len();
        self.slots.push(Slot {
            item,
            generation: 0,
            status: SlotStatus::Ready,
        });
        self.ready.push_back(index);
        self.stats.created += 1;
        PoolHandle::new(index, 0)
    }

    /// Make sure the ready queue can serve one item, then dequeue it.
    fn next_ready(&mut self) -> Result<(usize, bool), PoolError> {
        let mut created = false;
        if self.ready.is_empty() {
            if self.available_slots() > 0 {
                self.create();
                created = true;
            } else if self.config.allow_recycling {
                if let Some(oldest) = self.active.pop_front() {
                    self.recycle(oldest);
                }
            }
        }

        match self.ready.pop_front() {
            Some(index) => Ok((index, created)),
            None => {
                self.stats.exhausted += 1;
                let err = PoolError::Exhausted {
                    capacity: self.capacity(),
                    active: self.active_count(),
                };
                warn!(
                    capacity = self.capacity(),
                    active = self.active_count(),
                    recycling = self.config.allow_recycling,
                    "pool exhausted"
                );
                Err(err)
            }
        }
    }

    /// Reclaim an item already removed from the active queue.
    fn recycle(&mut self, index: usize) {
        let handle = self.handle_for(index);
        let slot = &mut self.slots[index];
        slot.status = SlotStatus::Ready;
        slot.item.set_active(false);
        slot.item.on_recycled();
        self.ready.push_back(index);
        self.stats.recycled += 1;

        debug!(%handle, "recycled oldest active item");
        self.emit(PoolEvent::Recycled { handle });
    }

    /// Start a new lease on a slot that was just dequeued from ready.
    fn lease(&mut self, index: usize, created: bool, place: impl FnOnce(&mut T)) -> PoolHandle {
        let activate = self.config.activate_on_retrieve;
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        slot.status = SlotStatus::Active;
        place(&mut slot.item);
        // a prewarm pass may have left this item switched on
        slot.item.set_active(activate);
        slot.item.on_pooled();
        let handle = PoolHandle::new(index, slot.generation);

        self.active.push_back(index);
        self.stats.pooled += 1;
        trace!(%handle, created, "item pooled");
        self.emit(PoolEvent::Pooled { handle, created });
        handle
    }

    fn check_active(&self, handle: PoolHandle) -> Result<(), PoolError> {
        match self.slot(handle) {
            None => Err(PoolError::StaleHandle { handle }),
            Some(slot) if slot.status != SlotStatus::Active => {
                Err(PoolError::NotActive { handle })
            }
            Some(_) => Ok(()),
        }
    }

    fn slot(&self, handle: PoolHandle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
    }

    fn handle_for(&self, index: usize) -> PoolHandle {
        PoolHandle::new(index, self.slots[index].generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct Bullet {
        id: usize,
        visible: bool,
        activations: usize,
        position: (i32, i32),
        hooks: Vec<&'static str>,
    }

    impl Poolable for Bullet {
        fn set_active(&mut self, active: bool) {
            if active {
                self.activations += 1;
            }
            self.visible = active;
        }

        fn on_pooled(&mut self) {
            self.hooks.push("pooled");
        }

        fn on_recycled(&mut self) {
            self.hooks.push("recycled");
        }

        fn on_returned(&mut self) {
            self.hooks.push("returned");
        }
    }

    impl Placeable for Bullet {
        type Placement = (i32, i32);

        fn place(&mut self, placement: Self::Placement) {
            // placement lands before activation
            assert!(!self.visible);
            self.position = placement;
        }
    }

    fn numbered() -> impl FnMut() -> Bullet {
        let mut next = 0;
        move || {
            next += 1;
            Bullet {
                id: next,
                ..Bullet::default()
            }
        }
    }

    fn pool(config: PoolConfig) -> ObjectPool<Bullet> {
        ObjectPool::new(config, numbered()).unwrap()
    }

    fn recording(pool: &mut ObjectPool<Bullet>) -> Log {
        let log = Log::default();
        let sink = Rc::clone(&log);
        pool.subscribe(move |event| {
            let entry = match event {
                PoolEvent::Pooled { handle, created } => {
                    format!("pooled {} created={}", handle.index(), created)
                }
                PoolEvent::Returned { handle } => format!("returned {}", handle.index()),
                PoolEvent::Recycled { handle } => format!("recycled {}", handle.index()),
                PoolEvent::PrewarmCompleted { handles } => {
                    format!("prewarm {}", handles.len())
                }
            };
            sink.borrow_mut().push(entry);
        });
        log
    }

    fn ids(pool: &ObjectPool<Bullet>, handles: impl Iterator<Item = PoolHandle>) -> Vec<usize> {
        handles
            .map(|h| pool.item(h).map(|b| b.id).unwrap_or_default())
            .collect()
    }

    #[test]
    fn new_pool_prewarms_inactive_items() {
        let pool = pool(PoolConfig::default().with_prewarm_count(3));

        assert_eq!(pool.ready_count(), 3);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.available_slots(), 7);
        assert!(pool
            .ready_handles()
            .all(|h| pool.item(h).is_some_and(|b| !b.visible)));
        assert_eq!(pool.stats().created, 3);
    }

    #[test]
    fn awake_on_creation_activates_each_new_item_once() {
        let awake = pool(PoolConfig::default().with_prewarm_count(3));
        assert!(awake
            .ready_handles()
            .all(|h| awake.item(h).is_some_and(|b| b.activations == 1 && !b.visible)));

        let asleep = pool(
            PoolConfig::default()
                .with_prewarm_count(3)
                .with_awake_on_creation(false),
        );
        assert!(asleep
            .ready_handles()
            .all(|h| asleep.item(h).is_some_and(|b| b.activations == 0 && !b.visible)));
    }

    #[test]
    fn on_demand_creation_is_awakened_before_lease() {
        let mut pool = pool(PoolConfig::default().with_activate_on_retrieve(false));

        let handle = pool.get().unwrap();

        let bullet = pool.item(handle).unwrap();
        assert_eq!(bullet.activations, 1);
        assert!(!bullet.visible);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = ObjectPool::new(PoolConfig::default().with_max_pool_size(0), numbered());
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
    }

    #[test]
    fn prewarm_is_bounded_by_capacity() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(4).with_prewarm_count(1));

        assert_eq!(pool.prewarm(10), 3);
        assert_eq!(pool.total_count(), 4);
        assert_eq!(pool.prewarm(1), 0);
    }

    #[test]
    fn get_prefers_ready_items_in_fifo_order() {
        let mut pool = pool(PoolConfig::default().with_prewarm_count(2));
        let log = recording(&mut pool);

        let first = pool.get().unwrap();
        let second = pool.get().unwrap();

        assert_eq!(ids(&pool, [first, second].into_iter()), vec![1, 2]);
        assert_eq!(pool.stats().created, 2);
        assert_eq!(*log.borrow(), vec!["pooled 0 created=false", "pooled 1 created=false"]);
    }

    #[test]
    fn get_grows_on_demand() {
        let mut pool = pool(PoolConfig::default());
        let log = recording(&mut pool);

        let handle = pool.get().unwrap();

        assert!(pool.is_active(handle));
        assert_eq!(pool.total_count(), 1);
        assert_eq!(*log.borrow(), vec!["pooled 0 created=true"]);
    }

    #[test]
    fn activate_on_retrieve_controls_visibility() {
        let mut eager = pool(PoolConfig::default());
        let handle = eager.get().unwrap();
        assert!(eager.item(handle).is_some_and(|b| b.visible));

        let mut lazy = pool(PoolConfig::default().with_activate_on_retrieve(false));
        let handle = lazy.get().unwrap();
        assert!(lazy.item(handle).is_some_and(|b| !b.visible));
    }

    #[test]
    fn poolable_hooks_fire_in_order() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(1));

        let first = pool.get().unwrap();
        pool.return_to_pool(first).unwrap();
        let second = pool.get().unwrap();
        let third = pool.get().unwrap();

        assert_eq!(second.index(), third.index());
        assert_eq!(
            pool.item(third).map(|b| b.hooks.clone()),
            Some(vec!["pooled", "returned", "pooled", "recycled", "pooled"])
        );
    }

    #[test]
    fn recycling_evicts_oldest_active_item() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(2));
        let log = recording(&mut pool);

        let x1 = pool.get().unwrap();
        let x2 = pool.get().unwrap();
        let again = pool.get().unwrap();

        assert_eq!(again.index(), x1.index());
        assert_ne!(again, x1);
        assert_eq!(ids(&pool, pool.active_handles()), vec![2, 1]);
        assert_eq!(pool.ready_count(), 0);
        assert!(pool.is_active(x2));
        assert!(pool.item(x1).is_none());
        assert_eq!(
            *log.borrow(),
            vec![
                "pooled 0 created=true",
                "pooled 1 created=true",
                "recycled 0",
                "pooled 0 created=false",
            ]
        );
    }

    #[test]
    fn exhaustion_without_recycling_changes_nothing() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(1).with_recycling(false));
        let x1 = pool.get().unwrap();

        let result = pool.get();

        assert!(matches!(
            result,
            Err(PoolError::Exhausted {
                capacity: 1,
                active: 1
            })
        ));
        assert_eq!(pool.active_handles().collect::<Vec<_>>(), vec![x1]);
        assert_eq!(pool.ready_count(), 0);
        assert_eq!(pool.stats().exhausted, 1);
    }

    #[test]
    fn return_moves_item_to_back_of_ready_queue() {
        let mut pool = pool(PoolConfig::default().with_prewarm_count(2));
        let first = pool.get().unwrap();

        pool.return_to_pool(first).unwrap();

        assert_eq!(ids(&pool, pool.ready_handles()), vec![2, 1]);
        assert!(pool.is_ready(first));
        assert_eq!(pool.item(first).map(|b| b.visible), Some(false));
    }

    #[test]
    fn double_return_is_rejected() {
        let mut pool = pool(PoolConfig::default());
        let handle = pool.get().unwrap();
        pool.return_to_pool(handle).unwrap();

        let result = pool.return_to_pool(handle);

        assert!(matches!(result, Err(PoolError::NotActive { .. })));
        assert_eq!(pool.ready_count(), 1);
        assert_eq!(pool.stats().returned, 1);
    }

    #[test]
    fn stale_handle_cannot_return_new_lease() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(1));
        let old = pool.get().unwrap();
        pool.return_to_pool(old).unwrap();
        let new = pool.get().unwrap();

        let result = pool.return_to_pool(old);

        assert!(matches!(result, Err(PoolError::StaleHandle { .. })));
        assert!(pool.is_active(new));
    }

    #[test]
    fn recycled_lease_handle_is_stale() {
        let mut pool = pool(PoolConfig::default().with_max_pool_size(1));
        let old = pool.get().unwrap();
        let _new = pool.get().unwrap();

        assert!(matches!(
            pool.return_to_pool(old),
            Err(PoolError::StaleHandle { .. })
        ));
        assert!(pool.item_mut(old).is_none());
    }

    #[test]
    fn get_at_places_item_before_activation() {
        let mut pool = pool(PoolConfig::default());

        let handle = pool.get_at((4, -2)).unwrap();

        let bullet = pool.item(handle).unwrap();
        assert_eq!(bullet.position, (4, -2));
        assert!(bullet.visible);
    }

    #[test]
    fn item_mut_allows_in_place_updates() {
        let mut pool = pool(PoolConfig::default());
        let handle = pool.get().unwrap();

        if let Some(bullet) = pool.item_mut(handle) {
            bullet.position = (9, 9);
        }

        assert_eq!(pool.item(handle).map(|b| b.position), Some((9, 9)));
    }

    #[test]
    fn buffers_can_be_pooled() {
        let mut pool: ObjectPool<Vec<u8>> =
            ObjectPool::new(PoolConfig::default().with_max_pool_size(1), Vec::new).unwrap();
        let handle = pool.get().unwrap();
        if let Some(buffer) = pool.item_mut(handle) {
            buffer.extend_from_slice(b"frame");
        }

        pool.return_to_pool(handle).unwrap();
        let reused = pool.get().unwrap();

        assert_eq!(pool.item(reused).map(Vec::len), Some(0));
    }
}
