use super::networks_equal;
use crate::agent::DqnAgent;
use crate::network::{Activation, Layer, NeuralNetwork};
use crate::optimizer::{OptimizerWrapper, SGD};
use crate::replay_buffer::Transition;
use ndarray::{array, Array1, Array2};

/// Network whose output is a constant vector regardless of input: zero
/// weights, fixed biases.
fn constant_network(input_dim: usize, outputs: &[f32]) -> NeuralNetwork {
    let layer = Layer::new(input_dim, outputs.len(), Activation::Linear)
        .with_weights(Array2::zeros((input_dim, outputs.len())))
        .with_biases(Array1::from_vec(outputs.to_vec()));
    NeuralNetwork::new(
        &[input_dim, outputs.len()],
        &[Activation::Linear],
        OptimizerWrapper::SGD(SGD::new()),
    )
    .with_layers(vec![layer])
}

fn training_batch() -> Vec<Transition> {
    vec![
        Transition {
            state: array![0.2, -0.4],
            action: 0,
            reward: 1.0,
            next_state: array![0.3, -0.2],
            done: false,
        },
        Transition {
            state: array![-0.1, 0.5],
            action: 1,
            reward: -1.0,
            next_state: array![0.0, 0.6],
            done: true,
        },
    ]
}

#[test]
fn test_new_default_architecture() {
    let agent = DqnAgent::new_default(6, 3, OptimizerWrapper::SGD(SGD::new()), 10);

    // Three hidden layers of round(6 * 2/3 + 3) = 7 units, plus the head.
    assert_eq!(agent.q_network.layers.len(), 4);
    assert_eq!(agent.q_network.layers[0].weights.dim(), (6, 7));
    assert_eq!(agent.q_network.layers[1].weights.dim(), (7, 7));
    assert_eq!(agent.q_network.layers[2].weights.dim(), (7, 7));
    assert_eq!(agent.q_network.layers[3].weights.dim(), (7, 3));

    // Value and target networks start identical.
    assert!(networks_equal(&agent.q_network, &agent.target_network));
}

#[test]
fn test_greedy_action_takes_argmax() {
    let network = constant_network(2, &[0.1, 0.9, 0.3]);
    let mut agent = DqnAgent::from_network(network, 10);

    let action = agent.greedy_action(array![1.0, -1.0].view()).unwrap();
    assert_eq!(action, 1);
}

#[test]
fn test_bellman_target_bootstraps_when_not_done() {
    // Value network predicts zero everywhere; target network's best next
    // value is 10. Target for the taken action: 2 + 0.9 * 10 = 11, so with
    // lr = 0 the reported loss over two outputs is 11^2 / 2.
    let mut agent = DqnAgent::from_network(constant_network(2, &[0.0, 0.0]), 10);
    agent.target_network = constant_network(2, &[10.0, 1.0]);

    let batch = vec![Transition {
        state: array![0.0, 0.0],
        action: 0,
        reward: 2.0,
        next_state: array![0.0, 0.0],
        done: false,
    }];
    let loss = agent.train_on_batch(&batch, 0.9, 0.0).unwrap();
    assert!((loss - 60.5).abs() < 1e-4);
}

#[test]
fn test_bellman_target_gated_on_terminal() {
    // Terminal transitions drop the future term: target = reward = 2.
    let mut agent = DqnAgent::from_network(constant_network(2, &[0.0, 0.0]), 10);
    agent.target_network = constant_network(2, &[10.0, 1.0]);

    let batch = vec![Transition {
        state: array![0.0, 0.0],
        action: 0,
        reward: 2.0,
        next_state: array![0.0, 0.0],
        done: true,
    }];
    let loss = agent.train_on_batch(&batch, 0.9, 0.0).unwrap();
    assert!((loss - 2.0).abs() < 1e-4);
}

#[test]
fn test_target_sync_every_interval() {
    let mut agent = DqnAgent::new(&[2, 8, 2], OptimizerWrapper::SGD(SGD::new()), 10);
    let batch = training_batch();

    // The first update syncs (counter 0 is a multiple of the interval),
    // copying the freshly updated value network.
    agent.train_on_batch(&batch, 0.9, 0.05).unwrap();
    assert_eq!(agent.update_count(), 1);
    assert!(networks_equal(&agent.q_network, &agent.target_network));

    // Updates 2..=10 move the value network but leave the target alone.
    for _ in 0..9 {
        agent.train_on_batch(&batch, 0.9, 0.05).unwrap();
    }
    assert_eq!(agent.update_count(), 10);
    assert!(!networks_equal(&agent.q_network, &agent.target_network));

    // Update 11 hits counter 10 and hard-copies again.
    agent.train_on_batch(&batch, 0.9, 0.05).unwrap();
    assert!(networks_equal(&agent.q_network, &agent.target_network));
}

#[test]
fn test_train_on_empty_batch_fails() {
    let mut agent = DqnAgent::new(&[2, 4, 2], OptimizerWrapper::SGD(SGD::new()), 10);
    assert!(agent.train_on_batch(&[], 0.9, 0.01).is_err());
}

#[test]
fn test_train_rejects_out_of_range_action() {
    let mut agent = DqnAgent::new(&[2, 4, 2], OptimizerWrapper::SGD(SGD::new()), 10);
    let batch = vec![Transition {
        state: array![0.0, 0.0],
        action: 5,
        reward: 1.0,
        next_state: array![0.0, 0.0],
        done: false,
    }];
    assert!(agent.train_on_batch(&batch, 0.9, 0.01).is_err());
}

#[test]
fn test_value_network_checkpoint_roundtrip() {
    let mut agent = DqnAgent::new(&[2, 8, 2], OptimizerWrapper::SGD(SGD::new()), 10);
    agent.train_on_batch(&training_batch(), 0.9, 0.05).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value_network.bin");
    agent.q_network.save(&path).unwrap();

    let loaded = NeuralNetwork::load(&path).unwrap();
    assert!(networks_equal(&agent.q_network, &loaded));

    // A loaded checkpoint seeds both networks of a fresh agent.
    let restored = DqnAgent::from_network(loaded, 10);
    assert!(networks_equal(&restored.q_network, &restored.target_network));
}
