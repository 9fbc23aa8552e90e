//! Core state machine types.
//!
//! This module contains the building blocks the machine is assembled from:
//! - State identity via the `StateId` trait
//! - State behavior via the `State` trait
//! - Zero-argument guard predicates and their combinators
//! - History of committed state changes

mod history;
mod predicate;
mod state;

pub use history::{StateChange, StateHistory};
pub use predicate::{not, And, Not, Or, Predicate, PredicateExt};
pub use state::{State, StateId};
