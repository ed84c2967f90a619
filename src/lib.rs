//! # Ares - Team-Based Deep Q-Learning Trainer
//!
//! Ares trains a single shared value network to play team-based,
//! turn-structured arena games via off-policy temporal-difference learning
//! with experience replay. Every fighter on both teams follows the same
//! epsilon-greedy policy over one Q-network; episodes feed a bounded replay
//! buffer, and batched Bellman updates with a periodically-synchronized
//! target network train the policy.
//!
//! The game itself stays behind the [`env::TeamEnvironment`] trait: the
//! trainer only resets, steps, samples random actions, and addresses the
//! active fighter.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ares::config::TrainerConfig;
//! use ares::trainer::Trainer;
//! # use ares::env::{StepOutcome, TeamEnvironment};
//! # use ndarray::Array1;
//! # struct MyArena;
//! # impl TeamEnvironment for MyArena {
//! #     fn reset(&mut self) -> Array1<f32> { Array1::zeros(4) }
//! #     fn step(&mut self, _action: usize) -> StepOutcome {
//! #         StepOutcome { next_state: Array1::zeros(4), reward: 0.0, done: true, truncated: false }
//! #     }
//! #     fn sample_action(&mut self) -> usize { 0 }
//! #     fn state_dim(&self) -> usize { 4 }
//! #     fn num_actions(&self) -> usize { 2 }
//! #     fn team_len(&self, _team: usize) -> usize { 1 }
//! #     fn set_active(&mut self, _slot: usize, _team: usize) {}
//! # }
//!
//! let env = MyArena;
//! let config = TrainerConfig {
//!     epochs: 10,
//!     episodes_per_epoch: 100,
//!     ..TrainerConfig::default()
//! };
//!
//! let mut trainer = Trainer::new(env, config).unwrap();
//! let stats = trainer.train().unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - The shared DQN agent (value + target networks)
//! - [`config`] - Training hyperparameters and JSON loading
//! - [`env`] - The narrow environment interface the trainer consumes
//! - [`episode`] - Turn-based multi-agent rollout of one episode
//! - [`error`] - Error types and result handling
//! - [`metrics`] - Per-epoch training statistics
//! - [`network`] - The value-function approximator
//! - [`optimizer`] - Gradient-based update rules (SGD, Adam)
//! - [`replay_buffer`] - Bounded experience store with decoupled eviction
//! - [`shaping`] - Retroactive terminal reward adjustment
//! - [`trainer`] - The epochs-by-episodes training loop

pub mod agent;
pub mod config;
pub mod env;
pub mod episode;
pub mod error;
pub mod metrics;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;
pub mod shaping;
pub mod trainer;

#[cfg(test)]
mod tests;
