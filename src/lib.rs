//! Tickkit: object pooling and finite state machines for tick-driven loops
//!
//! Two independent building blocks for game-style update loops, both
//! single-threaded and driven by the host calling into them once per frame:
//!
//! # Core Concepts
//!
//! - **Object pool**: bounded reuse of expensive items with FIFO recycling,
//!   lifecycle hooks and a resumable prewarm pass
//! - **State machine**: states keyed by id, guarded transitions, global
//!   any-transitions with precedence, enter/update/fixed-update/exit hooks
//! - **Checkpoints**: serializable snapshots of a machine's position
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickkit::builder::StateMachineBuilder;
//! use tickkit::core::{not, State};
//! use tickkit::pool::{ObjectPool, PoolConfig, Poolable};
//! use tickkit::state_id;
//!
//! state_id! {
//!     enum Turret {
//!         Idle,
//!         Firing,
//!     }
//! }
//!
//! struct Shell;
//! impl Poolable for Shell {}
//!
//! struct Silent;
//! impl State for Silent {
//!     fn enter(&mut self) {}
//!     fn update(&mut self) {}
//!     fn fixed_update(&mut self) {}
//!     fn exit(&mut self) {}
//! }
//!
//! let target = Rc::new(Cell::new(false));
//! let (seen, lost) = (Rc::clone(&target), Rc::clone(&target));
//!
//! let mut turret = StateMachineBuilder::new()
//!     .state(Turret::Idle, Silent)
//!     .state(Turret::Firing, Silent)
//!     .transition(Turret::Idle, Turret::Firing, move || seen.get())
//!     .any_transition(Turret::Idle, not(move || lost.get()))
//!     .initial(Turret::Idle)
//!     .build()?;
//!
//! let mut shells = ObjectPool::new(PoolConfig::default().with_max_pool_size(4), || Shell)?;
//!
//! target.set(true);
//! turret.update();
//! if turret.current_state() == Some(&Turret::Firing) {
//!     shells.get()?;
//! }
//! assert_eq!(shells.active_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod fsm;
pub mod pool;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{not, Predicate, PredicateExt, State, StateId};
pub use fsm::{FsmError, StateMachine};
pub use pool::{ObjectPool, PoolConfig, PoolError, PoolEvent, PoolHandle, Poolable};
