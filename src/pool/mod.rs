//! Bounded object pool with recycling and batched prewarm.
//!
//! # Key Concepts
//!
//! - **Ready queue**: inactive items available for the next `get`
//! - **Active queue**: handed-out items, oldest acquisition first
//! - **Recycling**: when the pool is full and nothing is ready, the oldest
//!   active item is reclaimed instead of failing
//! - **Handles**: generational, so a lease cut short by recycling cannot be
//!   mistaken for the new one
//!
//! The pool never destroys its items. It only moves them between the two
//! queues, and `ready + active` never exceeds `max_pool_size`.

mod config;
mod error;
mod event;
mod handle;
mod object_pool;
mod poolable;
mod prewarm;

pub use config::{ConfigError, PoolConfig, MAX_POOL_SIZE};
pub use error::PoolError;
pub use event::{PoolEvent, PoolListener, PoolStats};
pub use handle::PoolHandle;
pub use object_pool::{Factory, ObjectPool};
pub use poolable::{Placeable, Poolable};
pub use prewarm::{PrewarmCursor, PrewarmStep};
