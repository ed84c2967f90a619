use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::network::Layer;

/// Gradient-based parameter update rule, applied layer by layer.
pub trait Optimizer {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32);
    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32);
}

#[derive(Serialize, Deserialize, Clone)]
pub enum OptimizerWrapper {
    SGD(SGD),
    Adam(Adam),
}

impl Optimizer for OptimizerWrapper {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        match self {
            OptimizerWrapper::SGD(optimizer) => optimizer.update_weights(weights, gradients, learning_rate),
            OptimizerWrapper::Adam(optimizer) => optimizer.update_weights(weights, gradients, learning_rate),
        }
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        match self {
            OptimizerWrapper::SGD(optimizer) => optimizer.update_biases(biases, gradients, learning_rate),
            OptimizerWrapper::Adam(optimizer) => optimizer.update_biases(biases, gradients, learning_rate),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SGD;

impl SGD {
    pub fn new() -> SGD {
        SGD
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SGD {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        weights.zip_mut_with(gradients, |w, &g| *w -= learning_rate * g);
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        biases.zip_mut_with(gradients, |b, &g| *b -= learning_rate * g);
    }
}

/// Adam with per-layer first and second moment buffers.
///
/// Updates arrive layer by layer in network order, weights before biases;
/// the cursors walk the moment buffers in the same order. The timestep
/// advances once per full pass, after the last layer's bias update.
#[derive(Serialize, Deserialize, Clone)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    m_weights: Vec<Array2<f32>>,
    v_weights: Vec<Array2<f32>>,
    m_biases: Vec<Array1<f32>>,
    v_biases: Vec<Array1<f32>>,
    weight_cursor: usize,
    bias_cursor: usize,
    t: i32,
}

impl Adam {
    pub fn new(layers: &[Layer], beta1: f32, beta2: f32, epsilon: f32) -> Self {
        let m_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let v_weights = layers
            .iter()
            .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
            .collect();
        let m_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();
        let v_biases = layers
            .iter()
            .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
            .collect();

        Adam {
            beta1,
            beta2,
            epsilon,
            m_weights,
            v_weights,
            m_biases,
            v_biases,
            weight_cursor: 0,
            bias_cursor: 0,
            t: 1,
        }
    }

    pub fn default_for(layers: &[Layer]) -> Self {
        Self::new(layers, 0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adam {
    fn update_weights(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        let index = self.weight_cursor;

        let m = &mut self.m_weights[index];
        *m = &*m * self.beta1 + gradients * (1.0 - self.beta1);
        let v = &mut self.v_weights[index];
        *v = &*v * self.beta2 + &(gradients * gradients) * (1.0 - self.beta2);

        let m_hat = self.m_weights[index].mapv(|x| x / (1.0 - self.beta1.powi(self.t)));
        let v_hat = self.v_weights[index].mapv(|x| x / (1.0 - self.beta2.powi(self.t)));

        *weights -= &((&m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon)) * learning_rate);

        self.weight_cursor = (index + 1) % self.m_weights.len();
    }

    fn update_biases(&mut self, biases: &mut Array1<f32>, gradients: &Array1<f32>, learning_rate: f32) {
        let index = self.bias_cursor;

        let m = &mut self.m_biases[index];
        *m = &*m * self.beta1 + gradients * (1.0 - self.beta1);
        let v = &mut self.v_biases[index];
        *v = &*v * self.beta2 + &(gradients * gradients) * (1.0 - self.beta2);

        let m_hat = self.m_biases[index].mapv(|x| x / (1.0 - self.beta1.powi(self.t)));
        let v_hat = self.v_biases[index].mapv(|x| x / (1.0 - self.beta2.powi(self.t)));

        *biases -= &((&m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon)) * learning_rate);

        self.bias_cursor = (index + 1) % self.m_biases.len();
        if self.bias_cursor == 0 {
            self.t += 1;
        }
    }
}
