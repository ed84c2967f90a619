use ndarray::Array1;
use rand::Rng;
use std::collections::VecDeque;

/// One recorded observation: acting in `state` with `action` produced
/// `reward` and led to `next_state`; `done` marks the episode-ending step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Array1<f32>,
    pub done: bool,
}

/// Bounded FIFO store of transitions shared across episodes and epochs.
///
/// Sampling and eviction are decoupled: `sample_batch` draws with
/// replacement and never mutates the buffer, while `discard_oldest` ages
/// out the front of the queue regardless of what was sampled. The trainer
/// composes the two (sample, then discard) per learning update.
#[derive(Clone)]
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        ReplayBuffer {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append transitions in order, evicting the oldest entries once the
    /// capacity is exceeded.
    pub fn extend<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = Transition>,
    {
        for transition in transitions {
            if self.buffer.len() == self.capacity {
                self.buffer.pop_front();
            }
            self.buffer.push_back(transition);
        }
    }

    /// Draw `batch_size` transitions uniformly at random, with replacement.
    /// Returns an empty batch when the buffer is empty.
    pub fn sample_batch<R: Rng>(&self, batch_size: usize, rng: &mut R) -> Vec<Transition> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        (0..batch_size)
            .map(|_| self.buffer[rng.gen_range(0..self.buffer.len())].clone())
            .collect()
    }

    /// Remove the `count` oldest transitions (fewer if the buffer is shorter).
    pub fn discard_oldest(&mut self, count: usize) {
        for _ in 0..count {
            if self.buffer.pop_front().is_none() {
                break;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}
