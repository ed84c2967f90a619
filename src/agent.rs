use crate::error::{AresError, Result};
use crate::network::{Activation, NeuralNetwork};
use crate::optimizer::OptimizerWrapper;
use crate::replay_buffer::Transition;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Shared Q-learning agent with a value network and a target network.
///
/// One agent drives every fighter on both teams: action selection reads the
/// value network, while Bellman bootstrap targets come from the target
/// network, a periodically hard-copied snapshot of the value network.
///
/// # Example
///
/// ```rust
/// use ares::agent::DqnAgent;
/// use ares::optimizer::{OptimizerWrapper, SGD};
/// use ndarray::array;
///
/// let optimizer = OptimizerWrapper::SGD(SGD::new());
/// let mut agent = DqnAgent::new_default(4, 3, optimizer, 10);
///
/// let state = array![0.1, -0.2, 0.3, -0.1];
/// let action = agent.greedy_action(state.view()).unwrap();
/// assert!(action < 3);
/// ```
#[derive(Serialize, Deserialize)]
pub struct DqnAgent {
    /// Value network used for action selection and the learning update
    pub q_network: NeuralNetwork,

    /// Snapshot of the value network used only for bootstrap targets
    pub target_network: NeuralNetwork,

    /// Hard-copy the target network every this many learning updates
    pub target_sync_interval: usize,

    /// Counter of learning updates performed
    update_counter: usize,
}

impl DqnAgent {
    /// Create an agent from explicit layer sizes. Hidden layers get ReLU,
    /// the output layer is linear.
    pub fn new(layer_sizes: &[usize], optimizer: OptimizerWrapper, target_sync_interval: usize) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "network must have at least input and output layers"
        );
        assert!(target_sync_interval > 0, "target_sync_interval must be positive");

        let mut activations = vec![Activation::Relu; layer_sizes.len() - 2];
        activations.push(Activation::Linear);

        let q_network = NeuralNetwork::new(layer_sizes, &activations, optimizer);
        let target_network = q_network.clone();

        DqnAgent {
            q_network,
            target_network,
            target_sync_interval,
            update_counter: 0,
        }
    }

    /// Create an agent with the default arena architecture: three hidden
    /// layers of `round(state_dim * 2/3 + num_actions)` units each.
    pub fn new_default(
        state_dim: usize,
        num_actions: usize,
        optimizer: OptimizerWrapper,
        target_sync_interval: usize,
    ) -> Self {
        let hidden = (state_dim as f32 * 2.0 / 3.0 + num_actions as f32).round() as usize;
        Self::new(
            &[state_dim, hidden, hidden, hidden, num_actions],
            optimizer,
            target_sync_interval,
        )
    }

    /// Wrap a value network loaded from a checkpoint. The target network
    /// starts as a copy of it.
    pub fn from_network(q_network: NeuralNetwork, target_sync_interval: usize) -> Self {
        let target_network = q_network.clone();
        DqnAgent {
            q_network,
            target_network,
            target_sync_interval,
            update_counter: 0,
        }
    }

    /// Select the action with the highest estimated value for `state`.
    pub fn greedy_action(&mut self, state: ArrayView1<f32>) -> Result<usize> {
        let q_values = self.q_network.forward(state);
        q_values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(idx, _)| idx)
            .ok_or_else(|| AresError::NumericalError("no Q-values to maximize over".to_string()))
    }

    /// Number of learning updates performed so far.
    pub fn update_count(&self) -> usize {
        self.update_counter
    }

    /// Hard-copy the value network parameters into the target network.
    pub fn sync_target(&mut self) {
        self.target_network = self.q_network.clone();
    }

    /// One learning update over a batch of transitions.
    ///
    /// Builds the Bellman regression targets (each sample's value-network
    /// output row with the taken action's entry replaced by
    /// `reward + gamma * max_a Q_target(next_state)[a]`, or by `reward`
    /// alone on terminal transitions) and takes one optimizer step toward
    /// them. The target network is re-synchronized whenever the update
    /// counter is a multiple of `target_sync_interval`, counted before the
    /// increment, so the very first update syncs.
    ///
    /// Returns the mean squared error of the training forward pass.
    pub fn train_on_batch(
        &mut self,
        batch: &[Transition],
        discount_factor: f32,
        learning_rate: f32,
    ) -> Result<f32> {
        if batch.is_empty() {
            return Err(AresError::EmptyBuffer("no transitions to train on".to_string()));
        }

        let batch_size = batch.len();
        let state_dim = batch[0].state.len();
        let num_actions = self.q_network.output_size();

        let mut states = Array2::zeros((batch_size, state_dim));
        let mut next_states = Array2::zeros((batch_size, state_dim));
        let mut actions = Vec::with_capacity(batch_size);
        let mut rewards = Vec::with_capacity(batch_size);
        let mut dones = Vec::with_capacity(batch_size);

        for (i, transition) in batch.iter().enumerate() {
            if transition.action >= num_actions {
                return Err(AresError::TrainingError(format!(
                    "action {} out of range for {} actions",
                    transition.action, num_actions
                )));
            }
            states.row_mut(i).assign(&transition.state);
            next_states.row_mut(i).assign(&transition.next_state);
            actions.push(transition.action);
            rewards.push(transition.reward);
            dones.push(transition.done);
        }

        let q_values = self.q_network.forward_batch(states.view());
        let next_q_values = self.target_network.forward_batch(next_states.view());

        // Regression targets: the current predictions, with only the taken
        // action's entry overwritten. Non-taken actions contribute no error.
        let mut targets = q_values;
        for i in 0..batch_size {
            let target = if dones[i] {
                rewards[i]
            } else {
                let max_next = next_q_values
                    .row(i)
                    .iter()
                    .fold(f32::NEG_INFINITY, |max, &v| max.max(v));
                rewards[i] + discount_factor * max_next
            };
            targets[[i, actions[i]]] = target;
        }

        let loss = self
            .q_network
            .train_batch(states.view(), targets.view(), learning_rate);

        if self.update_counter % self.target_sync_interval == 0 {
            self.sync_target();
        }
        self.update_counter += 1;

        Ok(loss)
    }
}
