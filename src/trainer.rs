use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use crate::agent::DqnAgent;
use crate::config::TrainerConfig;
use crate::env::{TeamEnvironment, NUM_TEAMS};
use crate::episode::EpisodeRunner;
use crate::error::{AresError, Result};
use crate::metrics::{floor_div, EpochStats};
use crate::network::{Activation, NeuralNetwork};
use crate::optimizer::{Adam, OptimizerWrapper, SGD};
use crate::replay_buffer::ReplayBuffer;

/// Top-level training loop: owns the environment, the shared agent, the
/// replay buffer, and the RNG streams, and runs epochs of episodes.
///
/// All mutable training state lives here; nothing is process-global. The
/// exploration stream and the batch-sampling stream are seeded separately
/// from `config.seed` so either can be reproduced in isolation.
pub struct Trainer<E: TeamEnvironment> {
    env: E,
    agent: DqnAgent,
    replay_buffer: ReplayBuffer,
    runner: EpisodeRunner,
    config: TrainerConfig,
    exploration_rng: StdRng,
    sampling_rng: StdRng,
}

impl<E: TeamEnvironment> Trainer<E> {
    /// Build a trainer for the given environment and configuration.
    ///
    /// Queries the environment's dimensions once. When the configured
    /// checkpoint file exists, the value network is loaded from it (a load
    /// failure aborts startup) and the target network starts as its copy;
    /// otherwise a fresh network with the default arena architecture and an
    /// Adam optimizer is created.
    pub fn new(env: E, config: TrainerConfig) -> Result<Self> {
        config.validate()?;

        let state_dim = env.state_dim();
        let num_actions = env.num_actions();
        if state_dim == 0 || num_actions == 0 {
            return Err(AresError::Environment(format!(
                "degenerate environment: state_dim = {}, num_actions = {}",
                state_dim, num_actions
            )));
        }

        let agent = match config.checkpoint.as_deref().filter(|path| path.exists()) {
            Some(path) => {
                let network = NeuralNetwork::load(path)?;
                info!("loaded value network checkpoint from {}", path.display());
                DqnAgent::from_network(network, config.target_sync_interval)
            }
            None => Self::fresh_agent(state_dim, num_actions, &config),
        };

        let runner = EpisodeRunner::new(
            config.exploration_rate,
            config.max_steps_per_episode,
            config.reward_for_win,
        );

        Ok(Trainer {
            env,
            agent,
            replay_buffer: ReplayBuffer::new(config.replay_start_threshold),
            runner,
            exploration_rng: StdRng::seed_from_u64(config.seed),
            sampling_rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
            config,
        })
    }

    fn fresh_agent(state_dim: usize, num_actions: usize, config: &TrainerConfig) -> DqnAgent {
        let hidden = (state_dim as f32 * 2.0 / 3.0 + num_actions as f32).round() as usize;
        let layer_sizes = [state_dim, hidden, hidden, hidden, num_actions];
        let activations = [
            Activation::Relu,
            Activation::Relu,
            Activation::Relu,
            Activation::Linear,
        ];
        let network = NeuralNetwork::new(&layer_sizes, &activations, OptimizerWrapper::SGD(SGD::new()));
        let optimizer = OptimizerWrapper::Adam(Adam::default_for(&network.layers));
        let network = network.with_optimizer(optimizer);
        DqnAgent::from_network(network, config.target_sync_interval)
    }

    pub fn agent(&self) -> &DqnAgent {
        &self.agent
    }

    pub fn replay_buffer(&self) -> &ReplayBuffer {
        &self.replay_buffer
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the full epochs-by-episodes loop, reporting per-epoch statistics
    /// and checkpointing the value network after every epoch.
    pub fn train(&mut self) -> Result<Vec<EpochStats>> {
        let mut all_stats = Vec::with_capacity(self.config.epochs);
        let mut epoch_start = Instant::now();

        for epoch in 0..self.config.epochs {
            let mut epoch_rewards = [0.0f32; NUM_TEAMS];
            let mut epoch_loss = 0.0f32;
            let mut updates = 0usize;
            let mut last_episode_rounds = 0usize;

            for _episode in 0..self.config.episodes_per_epoch {
                let outcome =
                    self.runner
                        .run(&mut self.env, &mut self.agent, &mut self.exploration_rng)?;

                for team in 0..NUM_TEAMS {
                    epoch_rewards[team] += outcome.team_rewards[team];
                }
                last_episode_rounds = outcome.rounds;

                // Episodes that never terminated contribute nothing.
                if outcome.terminated() {
                    for buffer in outcome.team_buffers {
                        self.replay_buffer.extend(buffer);
                    }
                }

                if self.replay_buffer.len() >= self.config.replay_start_threshold {
                    // Sample with replacement, then age out the oldest
                    // batch_size entries; the two sets are unrelated.
                    let batch = self
                        .replay_buffer
                        .sample_batch(self.config.batch_size, &mut self.sampling_rng);
                    self.replay_buffer.discard_oldest(self.config.batch_size);
                    let loss = self.agent.train_on_batch(
                        &batch,
                        self.config.discount_factor,
                        self.config.learning_rate,
                    )?;
                    epoch_loss += loss;
                    updates += 1;
                }
            }

            let stats = EpochStats {
                epoch,
                avg_team_rewards: [
                    floor_div(epoch_rewards[0], self.config.episodes_per_epoch),
                    floor_div(epoch_rewards[1], self.config.episodes_per_epoch),
                ],
                avg_steps: floor_div(last_episode_rounds as f32, self.config.episodes_per_epoch),
                avg_loss: (updates > 0).then(|| floor_div(epoch_loss, updates)),
                elapsed: epoch_start.elapsed(),
            };
            info!("{}", stats);
            self.save_checkpoint();
            all_stats.push(stats);
            epoch_start = Instant::now();
        }

        Ok(all_stats)
    }

    /// Persist the value network. A failure here must not lose in-memory
    /// training state, so it is reported and training continues.
    fn save_checkpoint(&self) {
        if let Some(path) = &self.config.checkpoint {
            if let Err(err) = self.agent.q_network.save(path) {
                error!("failed to save checkpoint to {}: {}", path.display(), err);
            }
        }
    }
}
