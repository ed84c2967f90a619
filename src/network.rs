use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::optimizer::{Optimizer, OptimizerWrapper};

/// An enumeration of the activation functions available to value-network layers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    /// Apply the activation function to a batch of pre-activations in-place.
    fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => {
                inputs.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Linear => {}
        }
    }

    /// Derivative of the activation function, evaluated at a batch of pre-activations.
    fn derivative_batch(&self, inputs: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => inputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Linear => Array2::ones(inputs.dim()),
        }
    }
}

/// A fully connected layer: weights, biases, and an activation function.
///
/// The layer caches its inputs and pre-activation outputs during the forward
/// pass so that `backward_batch` can compute gradients. The caches are
/// transient and never serialized; a checkpoint holds parameters only.
#[derive(Clone, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
    #[serde(skip)]
    pre_activation: Option<Array2<f32>>,
    #[serde(skip)]
    inputs: Option<Array2<f32>>,
}

impl Layer {
    /// Create a new layer with weights drawn uniformly from (-0.1, 0.1) and
    /// zero biases.
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        let weights = Array2::random((input_size, output_size), Uniform::new(-0.1, 0.1));
        let biases = Array1::zeros(output_size);
        Layer {
            weights,
            biases,
            activation,
            pre_activation: None,
            inputs: None,
        }
    }

    pub fn with_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), self.weights.dim());
        self.weights = weights;
        self
    }

    pub fn with_biases(mut self, biases: Array1<f32>) -> Self {
        assert_eq!(biases.dim(), self.biases.dim());
        self.biases = biases;
        self
    }

    fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        self.inputs = Some(inputs.to_owned());
        let mut outputs = inputs.dot(&self.weights) + &self.biases.view().insert_axis(Axis(0));
        self.pre_activation = Some(outputs.clone());
        self.activation.apply_batch(&mut outputs);
        outputs
    }

    /// Gradients of the layer parameters for a batch of output errors, plus
    /// the error adjusted by the activation derivative (needed to continue
    /// backpropagation into earlier layers).
    fn backward_batch(&self, output_errors: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>, Array1<f32>) {
        let pre_activation = self
            .pre_activation
            .as_ref()
            .expect("forward_batch() must run before backward_batch()");
        let inputs = self
            .inputs
            .as_ref()
            .expect("forward_batch() must run before backward_batch()");
        let activation_deriv = self.activation.derivative_batch(pre_activation.view());
        let adjusted_error = output_errors.to_owned() * &activation_deriv;
        let weight_gradients = inputs.t().dot(&adjusted_error);
        let bias_gradients = adjusted_error.sum_axis(Axis(0));
        (adjusted_error, weight_gradients, bias_gradients)
    }
}

/// The value-function approximator: a feed-forward network mapping a state
/// vector to one value estimate per action.
#[derive(Clone, Serialize, Deserialize)]
pub struct NeuralNetwork {
    pub layers: Vec<Layer>,
    pub optimizer: OptimizerWrapper,
}

impl NeuralNetwork {
    /// Create a network from consecutive layer sizes and matching activations.
    pub fn new(layer_sizes: &[usize], activations: &[Activation], optimizer: OptimizerWrapper) -> Self {
        assert_eq!(layer_sizes.len() - 1, activations.len());

        let layers = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(window, &activation)| Layer::new(window[0], window[1], activation))
            .collect::<Vec<_>>();

        NeuralNetwork { layers, optimizer }
    }

    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerWrapper) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Number of outputs, i.e. the size of the action space the network scores.
    pub fn output_size(&self) -> usize {
        self.layers.last().map(|layer| layer.biases.len()).unwrap_or(0)
    }

    /// Forward pass for a single state vector.
    pub fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32> {
        let input = input.insert_axis(Axis(0));
        let output = self.forward_batch(input.view());
        let output_size = output.shape()[1];
        output.into_shape((output_size,)).unwrap()
    }

    /// Forward pass for a batch of state vectors (batch x state_dim).
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current = inputs.to_owned();
        for layer in &mut self.layers {
            current = layer.forward_batch(current.view());
        }
        current
    }

    fn backward_batch(&mut self, output_errors: ArrayView2<f32>) -> Vec<(Array2<f32>, Array1<f32>)> {
        let mut gradients: Vec<(Array2<f32>, Array1<f32>)> = Vec::new();
        let mut current_error = output_errors.to_owned();

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let (adjusted_error, weight_gradients, bias_gradients) =
                layer.backward_batch(current_error.view());
            gradients.push((weight_gradients, bias_gradients));

            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        gradients
    }

    /// One gradient step toward the given regression targets.
    ///
    /// Runs a fresh forward pass over the inputs, backpropagates the squared
    /// error against the targets, and applies the optimizer to every layer.
    /// Returns the mean squared error of that forward pass (the pre-update
    /// loss).
    pub fn train_batch(
        &mut self,
        inputs: ArrayView2<f32>,
        targets: ArrayView2<f32>,
        learning_rate: f32,
    ) -> f32 {
        let outputs = self.forward_batch(inputs);
        let output_errors = &outputs - &targets;
        let loss = output_errors.mapv(|e| e * e).mean().unwrap_or(0.0);
        let gradients = self.backward_batch(output_errors.view());

        for (layer, (weight_gradients, bias_gradients)) in self.layers.iter_mut().zip(gradients) {
            self.optimizer
                .update_weights(&mut layer.weights, &weight_gradients, learning_rate);
            self.optimizer
                .update_biases(&mut layer.biases, &bias_gradients, learning_rate);
        }

        loss
    }

    /// Serialize the network parameters to a checkpoint file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a network from a checkpoint file written by [`NeuralNetwork::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let buffer = fs::read(path)?;
        let deserialized: Self = bincode::deserialize(&buffer)?;
        Ok(deserialized)
    }
}
