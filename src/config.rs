use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AresError, Result};

/// Training hyperparameters, fixed at startup.
///
/// The defaults reproduce the reference arena-training setup: fully random
/// exploration, a replay buffer whose capacity doubles as the learning
/// threshold, and a hard target sync every ten updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub epochs: usize,
    pub episodes_per_epoch: usize,
    pub discount_factor: f32,
    /// Round budget per episode; episodes that outlive it are discarded.
    pub max_steps_per_episode: usize,
    /// Probability of taking a random action. 1.0 means never greedy.
    pub exploration_rate: f32,
    pub batch_size: usize,
    /// Replay buffer capacity. Learning begins once the buffer holds this
    /// many transitions, i.e. once it is full.
    pub replay_start_threshold: usize,
    /// Magnitude of the terminal penalty applied to the losing team.
    pub reward_for_win: f32,
    pub learning_rate: f32,
    /// Hard-copy the target network every this many learning updates.
    pub target_sync_interval: usize,
    /// Seed for the trainer's RNG streams (exploration and batch sampling).
    pub seed: u64,
    /// Value-network checkpoint, loaded at startup when present and
    /// overwritten after every epoch.
    pub checkpoint: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            epochs: 1000,
            episodes_per_epoch: 1000,
            discount_factor: 0.99,
            max_steps_per_episode: 100_000,
            exploration_rate: 1.0,
            batch_size: 1000,
            replay_start_threshold: 5000,
            reward_for_win: 1.0,
            learning_rate: 0.0001,
            target_sync_interval: 10,
            seed: 0,
            checkpoint: None,
        }
    }
}

impl TrainerConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// the defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|err| AresError::SerializationError(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.episodes_per_epoch == 0 {
            return Err(AresError::invalid_parameter(
                "episodes_per_epoch",
                "must be positive",
            ));
        }
        if self.batch_size == 0 {
            return Err(AresError::invalid_parameter("batch_size", "must be positive"));
        }
        if self.replay_start_threshold == 0 {
            return Err(AresError::invalid_parameter(
                "replay_start_threshold",
                "must be positive",
            ));
        }
        if self.target_sync_interval == 0 {
            return Err(AresError::invalid_parameter(
                "target_sync_interval",
                "must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(AresError::invalid_parameter(
                "exploration_rate",
                "must lie in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(AresError::invalid_parameter(
                "discount_factor",
                "must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}
