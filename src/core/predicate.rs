//! Guard predicates for controlling state transitions.
//!
//! A predicate is a zero-argument boolean check. Transitions hold one and
//! fire on the first tick it evaluates to `true`. Predicates usually close
//! over shared game state (`Rc<Cell<_>>`, a blackboard, a timer) rather than
//! the machine itself.

/// A zero-argument condition evaluated once per tick.
///
/// Implemented for every `Fn() -> bool`, so plain closures work anywhere a
/// predicate is expected.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickkit::core::Predicate;
///
/// let seen = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&seen);
/// let spotted = move || flag.get();
///
/// assert!(!spotted.evaluate());
/// seen.set(true);
/// assert!(spotted.evaluate());
/// ```
pub trait Predicate {
    /// Evaluate the condition.
    fn evaluate(&self) -> bool;
}

impl<F> Predicate for F
where
    F: Fn() -> bool,
{
    fn evaluate(&self) -> bool {
        self()
    }
}

/// Inverts the wrapped predicate.
///
/// # Example
///
/// ```rust
/// use tickkit::core::{not, Predicate};
///
/// let never = not(|| true);
/// assert!(!never.evaluate());
/// ```
#[derive(Clone, Debug)]
pub struct Not<P> {
    inner: P,
}

impl<P: Predicate> Not<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Unwrap the negated predicate.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Predicate> Predicate for Not<P> {
    fn evaluate(&self) -> bool {
        !self.inner.evaluate()
    }
}

/// Both predicates must hold. The right side is skipped when the left fails.
#[derive(Clone, Debug)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<A: Predicate, B: Predicate> Predicate for And<A, B> {
    fn evaluate(&self) -> bool {
        self.left.evaluate() && self.right.evaluate()
    }
}

/// Either predicate may hold. The right side is skipped when the left passes.
#[derive(Clone, Debug)]
pub struct Or<A, B> {
    left: A,
    right: B,
}

impl<A: Predicate, B: Predicate> Predicate for Or<A, B> {
    fn evaluate(&self) -> bool {
        self.left.evaluate() || self.right.evaluate()
    }
}

/// Build a [`Not`] around any predicate.
pub fn not<P: Predicate>(predicate: P) -> Not<P> {
    Not::new(predicate)
}

/// Combinators available on every predicate.
pub trait PredicateExt: Predicate + Sized {
    fn not(self) -> Not<Self> {
        Not::new(self)
    }

    fn and<B: Predicate>(self, other: B) -> And<Self, B> {
        And {
            left: self,
            right: other,
        }
    }

    fn or<B: Predicate>(self, other: B) -> Or<Self, B> {
        Or {
            left: self,
            right: other,
        }
    }
}

impl<P: Predicate> PredicateExt for P {}
