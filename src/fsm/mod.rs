//! Predicate-driven finite state machine.
//!
//! # Key Concepts
//!
//! - **States**: behaviors registered under a `StateId`, each with its own
//!   outgoing transitions
//! - **Transitions**: guarded edges checked in registration order
//! - **Any-transitions**: global edges checked before the current state's
//! - **Ticks**: `update` resolves transitions then runs the current state,
//!   `fixed_update` only runs the current state
//!
//! The machine is single-threaded and tick-driven. Guards and state hooks
//! run synchronously inside `update`, and `&mut self` rules out re-entrant
//! ticks.

mod error;
mod machine;
mod transition;

pub use error::FsmError;
pub use machine::{StateListener, StateMachine};
pub use transition::Transition;
