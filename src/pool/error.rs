//! Object pool errors.

use super::config::ConfigError;
use super::handle::PoolHandle;
use thiserror::Error;

/// Errors reported by [`ObjectPool`](super::ObjectPool) operations.
///
/// `Exhausted` is an expected operating condition: callers usually skip the
/// spawn for this tick and carry on.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Pool exhausted: {active} of {capacity} items active and recycling unavailable")]
    Exhausted { capacity: usize, active: usize },

    #[error("Handle {handle} is stale; the item was returned or recycled since it was issued")]
    StaleHandle { handle: PoolHandle },

    #[error("Handle {handle} refers to an item that is already in the ready queue")]
    NotActive { handle: PoolHandle },

    #[error("Invalid pool configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("Pool configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

fn describe(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
