//! State identity and state behavior traits.
//!
//! A machine keys its registry by a [`StateId`] value and drives a boxed
//! [`State`] behavior for each registered id.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a registered state.
///
/// Ids are small values (usually unit-variant enums) used as registry keys,
/// transition targets, history entries and checkpoint payloads.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: ids key the state registry
/// - `Debug`: ids appear in diagnostics
/// - `Serialize` + `DeserializeOwned`: ids are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use tickkit::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Guard {
///     Idle,
///     Patrol,
/// }
///
/// impl StateId for Guard {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Patrol => "Patrol",
///         }
///     }
/// }
///
/// assert_eq!(Guard::Patrol.name(), "Patrol");
/// ```
pub trait StateId: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned {
    /// Name used in log output.
    fn name(&self) -> &str;
}

/// Behavior of a single state.
///
/// The machine calls `enter` when the state becomes current, `update` once
/// per variable-rate tick, `fixed_update` once per fixed-rate tick, and `exit`
/// when a transition leaves it. `exit` always completes before the next
/// state's `enter` begins.
pub trait State {
    fn enter(&mut self);

    fn update(&mut self);

    fn fixed_update(&mut self);

    fn exit(&mut self);
}

impl<S: State + ?Sized> State for Box<S> {
    fn enter(&mut self) {
        (**self).enter();
    }

    fn update(&mut self) {
        (**self).update();
    }

    fn fixed_update(&mut self) {
        (**self).fixed_update();
    }

    fn exit(&mut self) {
        (**self).exit();
    }
}
