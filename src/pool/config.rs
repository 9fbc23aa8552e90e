//! Pool configuration and validation.

use super::error::PoolError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems found while validating a [`PoolConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_pool_size must be at least 1")]
    ZeroCapacity,

    #[error("prewarm_count ({prewarm}) exceeds max_pool_size ({max})")]
    PrewarmExceedsCapacity { prewarm: usize, max: usize },

    #[error("activation_batch_size must be at least 1")]
    ZeroBatchSize,

    #[error("max_pool_size ({max}) exceeds the handle range ({limit})")]
    CapacityOverflow { max: usize, limit: usize },
}

/// Largest pool a [`PoolHandle`](super::PoolHandle) can address.
pub const MAX_POOL_SIZE: usize = u32::MAX as usize;

/// Settings fixed when a pool is created.
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use tickkit::pool::PoolConfig;
///
/// let config = PoolConfig::from_json(r#"{ "max_pool_size": 32, "prewarm_count": 8 }"#)?;
/// assert_eq!(config.max_pool_size, 32);
/// assert!(config.allow_recycling);
/// # Ok::<(), tickkit::pool::PoolError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Items created up front when the pool is built
    pub prewarm_count: usize,

    /// Hard cap on ready + active items
    pub max_pool_size: usize,

    /// Items handled per step of a batched prewarm activation pass
    pub activation_batch_size: usize,

    /// Activate each new item once at creation before parking it as ready
    pub awake_on_creation: bool,

    /// Activate items as they are handed out by `get`
    pub activate_on_retrieve: bool,

    /// Reclaim the oldest active item when the pool is exhausted
    pub allow_recycling: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            prewarm_count: 0,
            max_pool_size: 10,
            activation_batch_size: 10,
            awake_on_creation: true,
            activate_on_retrieve: true,
            allow_recycling: true,
        }
    }
}

impl PoolConfig {
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_pool_size(mut self, max: usize) -> Self {
        self.max_pool_size = max;
        self
    }

    pub fn with_prewarm_count(mut self, count: usize) -> Self {
        self.prewarm_count = count;
        self
    }

    pub fn with_activation_batch_size(mut self, size: usize) -> Self {
        self.activation_batch_size = size;
        self
    }

    pub fn with_awake_on_creation(mut self, awake: bool) -> Self {
        self.awake_on_creation = awake;
        self
    }

    pub fn with_activate_on_retrieve(mut self, activate: bool) -> Self {
        self.activate_on_retrieve = activate;
        self
    }

    pub fn with_recycling(mut self, allow: bool) -> Self {
        self.allow_recycling = allow;
        self
    }

    /// Check every rule, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        checks.push(if self.max_pool_size == 0 {
            Validation::fail(ConfigError::ZeroCapacity)
        } else {
            Validation::success(())
        });

        checks.push(if self.max_pool_size > MAX_POOL_SIZE {
            Validation::fail(ConfigError::CapacityOverflow {
                max: self.max_pool_size,
                limit: MAX_POOL_SIZE,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.prewarm_count > self.max_pool_size {
            Validation::fail(ConfigError::PrewarmExceedsCapacity {
                prewarm: self.prewarm_count,
                max: self.max_pool_size,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.activation_batch_size == 0 {
            Validation::fail(ConfigError::ZeroBatchSize)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) folded into a `Result`.
    pub fn check(&self) -> Result<(), PoolError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(PoolError::InvalidConfig(
                errors.iter().cloned().collect(),
            )),
        }
    }
}
