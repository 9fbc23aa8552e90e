//! Macros for ergonomic state machine construction.

/// Declare a unit-variant enum usable as a [`StateId`](crate::core::StateId).
///
/// Derives everything a state id needs and implements `name()` from the
/// variant identifiers.
///
/// # Example
///
/// ```
/// use tickkit::core::StateId;
/// use tickkit::state_id;
///
/// state_id! {
///     pub enum EnemyState {
///         Idle,
///         Patrol,
///         Chase,
///     }
/// }
///
/// assert_eq!(EnemyState::Chase.name(), "Chase");
/// ```
#[macro_export]
macro_rules! state_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
