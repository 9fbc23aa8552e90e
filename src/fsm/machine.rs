//! Tick-driven state machine with guarded and global transitions.

use crate::checkpoint::MachineMetadata;
use crate::core::{Predicate, State, StateChange, StateHistory, StateId};
use crate::fsm::error::FsmError;
use crate::fsm::transition::{first_satisfied, StateNode, Transition};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Callback fired after every committed state change.
pub type StateListener<K> = Box<dyn FnMut(&K)>;

/// Predicate-driven finite state machine.
///
/// States are registered once with [`add_state`](Self::add_state), wired with
/// [`add_transition`](Self::add_transition) and
/// [`add_any_transition`](Self::add_any_transition), and started with
/// [`set_state`](Self::set_state). From then on the host loop calls
/// [`update`](Self::update) once per frame and
/// [`fixed_update`](Self::fixed_update) once per fixed step.
///
/// Each `update` evaluates the global transitions first, then the current
/// state's own transitions, both in registration order. The first satisfied
/// guard wins. A winning transition that targets the current state is
/// ignored, so no `exit`/`enter` churn happens on self-loops.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickkit::core::{PredicateExt, State};
/// use tickkit::fsm::StateMachine;
/// use tickkit::state_id;
///
/// state_id! {
///     enum Mode {
///         Idle,
///         Patrol,
///     }
/// }
///
/// struct Quiet;
///
/// impl State for Quiet {
///     fn enter(&mut self) {}
///     fn update(&mut self) {}
///     fn fixed_update(&mut self) {}
///     fn exit(&mut self) {}
/// }
///
/// let alert = Rc::new(Cell::new(false));
/// let seen = Rc::clone(&alert);
/// let cleared = Rc::clone(&alert);
///
/// let mut machine = StateMachine::new();
/// machine.add_state(Mode::Idle, Quiet)?;
/// machine.add_state(Mode::Patrol, Quiet)?;
/// machine.add_transition(Mode::Idle, Mode::Patrol, move || seen.get())?;
/// machine.add_any_transition(Mode::Idle, (move || cleared.get()).not())?;
/// machine.set_state(Mode::Idle)?;
///
/// alert.set(true);
/// machine.update();
/// assert_eq!(machine.current_state(), Some(&Mode::Patrol));
///
/// alert.set(false);
/// machine.update();
/// assert_eq!(machine.current_state(), Some(&Mode::Idle));
/// # Ok::<(), tickkit::fsm::FsmError>(())
/// ```
pub struct StateMachine<K: StateId> {
    pub(crate) nodes: HashMap<K, StateNode<K>>,
    any_transitions: Vec<Transition<K>>,
    pub(crate) current: Option<K>,
    pub(crate) previous: Option<K>,
    listeners: Vec<StateListener<K>>,
    pub(crate) history: StateHistory<K>,
    pub(crate) metadata: MachineMetadata,
}

impl<K: StateId> Default for StateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateId> StateMachine<K> {
    /// Create an empty, uninitialized machine with unbounded history.
    pub fn new() -> Self {
        Self::with_history(StateHistory::new())
    }

    /// Create an empty machine that retains at most `limit` history entries.
    pub fn with_history_limit(limit: usize) -> Self {
        Self::with_history(StateHistory::with_limit(limit))
    }

    fn with_history(history: StateHistory<K>) -> Self {
        Self {
            nodes: HashMap::new(),
            any_transitions: Vec::new(),
            current: None,
            previous: None,
            listeners: Vec::new(),
            history,
            metadata: MachineMetadata::default(),
        }
    }

    /// Register a state's behavior under `id`.
    pub fn add_state<S>(&mut self, id: K, behavior: S) -> Result<(), FsmError>
    where
        S: State + 'static,
    {
        self.insert_state(id, Box::new(behavior))
    }

    /// Add a transition evaluated only while `from` is current.
    pub fn add_transition<P>(&mut self, from: K, to: K, predicate: P) -> Result<(), FsmError>
    where
        P: Predicate + 'static,
    {
        self.insert_transition(from, Transition::new(to, predicate))
    }

    /// Add a transition evaluated from every state, ahead of per-state ones.
    pub fn add_any_transition<P>(&mut self, to: K, predicate: P) -> Result<(), FsmError>
    where
        P: Predicate + 'static,
    {
        self.insert_any_transition(Transition::new(to, predicate))
    }

    /// Register a listener fired after every committed state change.
    pub fn on_state_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&K) + 'static,
    {
        self.insert_listener(Box::new(listener));
    }

    /// Force the current state.
    ///
    /// Meant for initialization: the previous state's `exit` is not called
    /// and no transitions are evaluated. The new state's `enter` runs, then
    /// listeners are notified.
    pub fn set_state(&mut self, id: K) -> Result<(), FsmError> {
        let node = self.nodes.get_mut(&id).ok_or_else(|| unregistered(&id))?;
        debug!(state = id.name(), "state set");
        node.behavior.enter();
        let from = self.current.take();
        self.commit(from, id);
        Ok(())
    }

    /// Run one variable-rate tick.
    ///
    /// Resolves at most one transition, then calls the current state's
    /// `update` exactly once. Does nothing before the first `set_state`.
    pub fn update(&mut self) {
        let Some(current) = self.current.clone() else {
            trace!("update ignored, no current state");
            return;
        };
        self.metadata.ticks += 1;

        if let Some(target) = self.resolve(&current) {
            if target != current {
                self.change_state(current, target);
            }
        }

        if let Some(id) = &self.current {
            if let Some(node) = self.nodes.get_mut(id) {
                node.behavior.update();
            }
        }
    }

    /// Run one fixed-rate tick. Never evaluates transitions.
    pub fn fixed_update(&mut self) {
        let Some(id) = &self.current else {
            trace!("fixed_update ignored, no current state");
            return;
        };
        self.metadata.fixed_ticks += 1;
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior.fixed_update();
        }
    }

    /// Currently active state, `None` before the first `set_state`.
    pub fn current_state(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// State that was current before the last committed change.
    pub fn previous_state(&self) -> Option<&K> {
        self.previous.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn contains_state(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of transitions leaving `id`, not counting any-transitions.
    pub fn transition_count(&self, id: &K) -> Result<usize, FsmError> {
        self.nodes
            .get(id)
            .map(|node| node.transitions.len())
            .ok_or_else(|| unregistered(id))
    }

    pub fn any_transition_count(&self) -> usize {
        self.any_transitions.len()
    }

    pub fn history(&self) -> &StateHistory<K> {
        &self.history
    }

    pub fn metadata(&self) -> &MachineMetadata {
        &self.metadata
    }

    pub(crate) fn insert_state(
        &mut self,
        id: K,
        behavior: Box<dyn State>,
    ) -> Result<(), FsmError> {
        if self.nodes.contains_key(&id) {
            return Err(FsmError::DuplicateState {
                name: id.name().to_string(),
            });
        }
        debug!(state = id.name(), "registered state");
        self.nodes.insert(id, StateNode::new(behavior));
        Ok(())
    }

    pub(crate) fn insert_transition(
        &mut self,
        from: K,
        transition: Transition<K>,
    ) -> Result<(), FsmError> {
        self.ensure_registered(transition.target())?;
        let node = self
            .nodes
            .get_mut(&from)
            .ok_or_else(|| unregistered(&from))?;
        node.transitions.push(transition);
        Ok(())
    }

    pub(crate) fn insert_any_transition(
        &mut self,
        transition: Transition<K>,
    ) -> Result<(), FsmError> {
        self.ensure_registered(transition.target())?;
        self.any_transitions.push(transition);
        Ok(())
    }

    pub(crate) fn insert_listener(&mut self, listener: StateListener<K>) {
        self.listeners.push(listener);
    }

    fn ensure_registered(&self, id: &K) -> Result<(), FsmError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(unregistered(id))
        }
    }

    fn resolve(&self, current: &K) -> Option<K> {
        let local = self
            .nodes
            .get(current)
            .map(|node| node.transitions.as_slice())
            .unwrap_or_default();
        first_satisfied(&self.any_transitions, local).map(|t| t.target().clone())
    }

    fn change_state(&mut self, from: K, to: K) {
        debug!(from = from.name(), to = to.name(), "state changed");
        if let Some(node) = self.nodes.get_mut(&from) {
            node.behavior.exit();
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.behavior.enter();
        }
        self.commit(Some(from), to);
    }

    fn commit(&mut self, from: Option<K>, to: K) {
        let now = Utc::now();
        *self
            .metadata
            .entries
            .entry(to.name().to_string())
            .or_insert(0) += 1;
        self.metadata.updated_at = now;
        self.history.record(StateChange {
            from: from.clone(),
            to: to.clone(),
            timestamp: now,
            tick: self.metadata.ticks,
        });
        self.previous = from;
        self.current = Some(to);
        self.notify();
    }

    pub(crate) fn notify(&mut self) {
        if let Some(current) = &self.current {
            for listener in &mut self.listeners {
                listener(current);
            }
        }
    }
}

fn unregistered<K: StateId>(id: &K) -> FsmError {
    FsmError::UnregisteredState {
        name: id.name().to_string(),
    }
}
