//! Capabilities a pooled item may opt into.

/// Lifecycle hooks the pool calls on its items.
///
/// Every method has a no-op default, so a type that needs no notifications
/// opts in with an empty `impl Poolable for MyType {}`. The pool calls these
/// synchronously inside the operation that triggers them.
pub trait Poolable {
    /// Show or hide the item. Ready items are always inactive.
    fn set_active(&mut self, _active: bool) {}

    /// Called when the item is handed out by `get`.
    fn on_pooled(&mut self) {}

    /// Called when the item is forcibly reclaimed as the oldest active item.
    /// Reset any per-use state here; the item is handed out again right away.
    fn on_recycled(&mut self) {}

    /// Called when the item is returned with `return_to_pool`.
    fn on_returned(&mut self) {}
}

/// Items that can be positioned as they are retrieved.
///
/// `Placement` is whatever the host uses to describe where an item goes: a
/// position, a transform, a parent id. It is applied before the item is
/// activated.
pub trait Placeable: Poolable {
    type Placement;

    fn place(&mut self, placement: Self::Placement);
}

impl<T> Poolable for Vec<T> {
    fn on_returned(&mut self) {
        self.clear();
    }

    fn on_recycled(&mut self) {
        self.clear();
    }
}

impl Poolable for String {
    fn on_returned(&mut self) {
        self.clear();
    }

    fn on_recycled(&mut self) {
        self.clear();
    }
}
