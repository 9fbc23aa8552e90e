//! Guarded transitions and per-state registry nodes.

use crate::core::{Predicate, State};

/// A guarded edge to a target state.
///
/// The source is implied by where the transition is stored: a state's node
/// for ordinary transitions, the machine's global list for any-transitions.
pub struct Transition<K> {
    to: K,
    predicate: Box<dyn Predicate>,
}

impl<K> Transition<K> {
    pub fn new<P>(to: K, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        Self {
            to,
            predicate: Box::new(predicate),
        }
    }

    /// State this transition leads to.
    pub fn target(&self) -> &K {
        &self.to
    }

    /// Evaluate the guard.
    pub fn is_satisfied(&self) -> bool {
        self.predicate.evaluate()
    }
}

/// Registry entry pairing a state's behavior with its outgoing transitions.
pub(crate) struct StateNode<K> {
    pub(crate) behavior: Box<dyn State>,
    pub(crate) transitions: Vec<Transition<K>>,
}

impl<K> StateNode<K> {
    pub(crate) fn new(behavior: Box<dyn State>) -> Self {
        Self {
            behavior,
            transitions: Vec::new(),
        }
    }
}

/// First satisfied transition, global list before local, insertion order.
pub(crate) fn first_satisfied<'a, K>(
    global: &'a [Transition<K>],
    local: &'a [Transition<K>],
) -> Option<&'a Transition<K>> {
    global.iter().chain(local).find(|t| t.is_satisfied())
}
