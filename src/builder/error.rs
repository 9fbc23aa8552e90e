//! Build errors for the state machine builder.

use crate::fsm::FsmError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states registered. Add at least one state with .state(id, behavior)")]
    NoStates,

    #[error(transparent)]
    Machine(#[from] FsmError),
}
