//! Checkpoint and restore for state machines.
//!
//! A checkpoint captures where a machine is (current state, history, tick
//! counters) so a saved game or a hot-reloaded scene can resume from the same
//! position. Behaviors and guard predicates are code, not data, and are never
//! part of a checkpoint: restore targets a machine that was rebuilt with the
//! same states.

use crate::core::{StateHistory, StateId};
use crate::fsm::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Metadata tracked by state machine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineMetadata {
    /// When machine was created
    pub created_at: DateTime<Utc>,

    /// Time of the last committed state change
    pub updated_at: DateTime<Utc>,

    /// `update` calls made while the machine was running
    pub ticks: u64,

    /// `fixed_update` calls made while the machine was running
    pub fixed_ticks: u64,

    /// How many times each state was entered (state name -> count)
    pub entries: HashMap<String, usize>,
}

impl Default for MachineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            ticks: 0,
            fixed_ticks: 0,
            entries: HashMap::new(),
        }
    }
}

/// Serializable checkpoint of state machine position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<K: StateId> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state, `None` for a machine that was never started
    pub current_state: Option<K>,

    /// State that was current before the last change
    pub previous_state: Option<K>,

    /// Retained state change history
    pub history: StateHistory<K>,

    /// Machine metadata
    pub metadata: MachineMetadata,
}

impl<K: StateId> Checkpoint<K> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

impl<K: StateId> StateMachine<K> {
    /// Capture the machine's current position.
    pub fn checkpoint(&self) -> Checkpoint<K> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.current.clone(),
            previous_state: self.previous.clone(),
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Resume from a checkpoint.
    ///
    /// The stored state is re-entered the way `set_state` enters it: its
    /// `enter` runs and listeners are notified, but the previous state's
    /// `exit` is not called. History and metadata are replaced by the
    /// checkpoint's. Nothing changes when validation fails.
    pub fn restore(&mut self, checkpoint: &Checkpoint<K>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;
        if let Some(id) = &checkpoint.current_state {
            if !self.contains_state(id) {
                return Err(CheckpointError::UnknownState {
                    name: id.name().to_string(),
                });
            }
        }

        debug!(checkpoint = %checkpoint.id, "restoring state machine");
        self.history = checkpoint.history.clone();
        self.metadata = checkpoint.metadata.clone();
        self.previous = checkpoint.previous_state.clone();
        self.current = checkpoint.current_state.clone();

        if let Some(id) = &self.current {
            if let Some(node) = self.nodes.get_mut(id) {
                node.behavior.enter();
            }
        }
        self.notify();
        Ok(())
    }
}
