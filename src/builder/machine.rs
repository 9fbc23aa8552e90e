//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Predicate, State, StateId};
use crate::fsm::{StateListener, StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
///
/// Registration order is preserved: states are added first, then
/// transitions and any-transitions in the order they were declared, so
/// evaluation order matches declaration order. Errors in the graph are
/// reported by [`build`](Self::build).
pub struct StateMachineBuilder<K: StateId> {
    initial: Option<K>,
    states: Vec<(K, Box<dyn State>)>,
    transitions: Vec<(K, Transition<K>)>,
    any_transitions: Vec<Transition<K>>,
    listeners: Vec<StateListener<K>>,
    history_limit: Option<usize>,
}

impl<K: StateId> StateMachineBuilder<K> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
            any_transitions: Vec::new(),
            listeners: Vec::new(),
            history_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: K) -> Self {
        self.initial = Some(state);
        self
    }

    /// Register a state and its behavior.
    pub fn state<S>(mut self, id: K, behavior: S) -> Self
    where
        S: State + 'static,
    {
        self.states.push((id, Box::new(behavior)));
        self
    }

    /// Add a transition checked while `from` is current.
    pub fn transition<P>(mut self, from: K, to: K, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.transitions.push((from, Transition::new(to, predicate)));
        self
    }

    /// Add a transition checked from every state.
    pub fn any_transition<P>(mut self, to: K, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.any_transitions.push(Transition::new(to, predicate));
        self
    }

    /// Register a state-changed listener. Listeners also observe the
    /// initial state entered by `build`.
    pub fn on_state_changed<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&K) + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Keep at most `limit` history entries.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the state machine and enter the initial state.
    /// Returns an error if required fields are missing or the graph
    /// references unregistered states.
    pub fn build(self) -> Result<StateMachine<K>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = match self.history_limit {
            Some(limit) => StateMachine::with_history_limit(limit),
            None => StateMachine::new(),
        };
        for (id, behavior) in self.states {
            machine.insert_state(id, behavior)?;
        }
        for (from, transition) in self.transitions {
            machine.insert_transition(from, transition)?;
        }
        for transition in self.any_transitions {
            machine.insert_any_transition(transition)?;
        }
        for listener in self.listeners {
            machine.insert_listener(listener);
        }

        machine.set_state(initial)?;
        Ok(machine)
    }
}

impl<K: StateId> Default for StateMachineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::not;
    use crate::fsm::FsmError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    crate::state_id! {
        enum TestState {
            Idle,
            Patrol,
            Alarm,
        }
    }

    struct Noop;

    impl State for Noop {
        fn enter(&mut self) {}
        fn update(&mut self) {}
        fn fixed_update(&mut self) {}
        fn exit(&mut self) {}
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<TestState>::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Idle)
            .build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn builder_reports_unregistered_initial_state() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Alarm)
            .state(TestState::Idle, Noop)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(FsmError::UnregisteredState { .. }))
        ));
    }

    #[test]
    fn builder_reports_dangling_transition() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Idle)
            .state(TestState::Idle, Noop)
            .transition(TestState::Idle, TestState::Patrol, || true)
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::Machine(FsmError::UnregisteredState {
                name: "Patrol".to_string()
            }))
        );
    }

    #[test]
    fn fluent_api_builds_running_machine() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let alert = Rc::new(Cell::new(false));
        let seen = Rc::clone(&alert);
        let cleared = Rc::clone(&alert);

        let mut machine = StateMachineBuilder::new()
            .initial(TestState::Idle)
            .state(TestState::Idle, Noop)
            .state(TestState::Alarm, Noop)
            .transition(TestState::Idle, TestState::Alarm, move || seen.get())
            .any_transition(TestState::Idle, not(move || cleared.get()))
            .on_state_changed(move |s| sink.borrow_mut().push(*s))
            .history_limit(4)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), Some(&TestState::Idle));
        assert_eq!(machine.history().limit(), Some(4));

        alert.set(true);
        machine.update();
        alert.set(false);
        machine.update();

        assert_eq!(
            *changes.borrow(),
            vec![TestState::Idle, TestState::Alarm, TestState::Idle]
        );
    }
}
