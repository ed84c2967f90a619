// Test modules for all components
pub mod test_agent;

use crate::env::{StepOutcome, TeamEnvironment};
use crate::network::NeuralNetwork;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn networks_equal(a: &NeuralNetwork, b: &NeuralNetwork) -> bool {
    a.layers.len() == b.layers.len()
        && a.layers
            .iter()
            .zip(&b.layers)
            .all(|(x, y)| x.weights == y.weights && x.biases == y.biases)
}

/// Deterministic arena for tests: rewards and the terminal step are scripted
/// per micro-step, and the script replays from the start on every reset.
/// With one fighter per team, micro-step `i` belongs to team `i % 2`.
pub struct ScriptedArena {
    pub state_dim: usize,
    pub num_actions: usize,
    pub team_sizes: [usize; 2],
    pub rewards: Vec<f32>,
    pub terminal_at: Option<usize>,
    step_count: usize,
    rng: StdRng,
    pub sampled_actions: usize,
    pub active_log: Vec<(usize, usize)>,
}

impl ScriptedArena {
    pub fn new(rewards: Vec<f32>, terminal_at: Option<usize>) -> Self {
        ScriptedArena {
            state_dim: 3,
            num_actions: 4,
            team_sizes: [1, 1],
            rewards,
            terminal_at,
            step_count: 0,
            rng: StdRng::seed_from_u64(7),
            sampled_actions: 0,
            active_log: Vec::new(),
        }
    }

    fn state_for(&self, step: usize) -> Array1<f32> {
        Array1::from_elem(self.state_dim, step as f32)
    }
}

impl TeamEnvironment for ScriptedArena {
    fn reset(&mut self) -> Array1<f32> {
        self.step_count = 0;
        self.state_for(0)
    }

    fn step(&mut self, _action: usize) -> StepOutcome {
        let i = self.step_count;
        self.step_count += 1;
        StepOutcome {
            next_state: self.state_for(i + 1),
            reward: self.rewards.get(i).copied().unwrap_or(0.0),
            done: self.terminal_at == Some(i),
            truncated: false,
        }
    }

    fn sample_action(&mut self) -> usize {
        self.sampled_actions += 1;
        self.rng.gen_range(0..self.num_actions)
    }

    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn team_len(&self, team: usize) -> usize {
        self.team_sizes[team]
    }

    fn set_active(&mut self, slot: usize, team: usize) {
        self.active_log.push((slot, team));
    }
}
