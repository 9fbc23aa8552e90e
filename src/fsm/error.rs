//! State machine setup errors.

use thiserror::Error;

/// Errors raised while wiring states and transitions together.
///
/// These indicate a misconfigured transition graph and are meant to surface
/// immediately during setup rather than be recovered from.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("State '{name}' is not registered. Call add_state before referencing it")]
    UnregisteredState { name: String },

    #[error("State '{name}' is already registered")]
    DuplicateState { name: String },
}
