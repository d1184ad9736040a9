//! DQN agent configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::training::LearnerConfig;

/// DQN agent configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DqnConfig {
    /// Discount factor for bootstrapped values (default: 0.6).
    pub gamma: f32,

    /// Probability of a uniformly random legal card (default: 0.1).
    /// 0 = always greedy.
    pub epsilon: f64,

    /// Replay buffer capacity (default: 2000).
    pub buffer_capacity: usize,

    /// Transitions per training minibatch (default: 32).
    pub batch_size: usize,

    /// Transitions collected between training steps (default: 16).
    /// Waiting lets fresh experience accumulate before each costly step.
    pub retrain_every: usize,

    /// Random seed for exploration and replay sampling.
    pub seed: u64,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            gamma: 0.6,
            epsilon: 0.1,
            buffer_capacity: 2000,
            batch_size: 32,
            retrain_every: 16,
            seed: 42,
        }
    }
}

impl DqnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the replay buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Set the minibatch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the training cadence.
    pub fn with_retrain_every(mut self, n: usize) -> Self {
        self.retrain_every = n;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the learner cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(AgentError::InvalidConfig(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(AgentError::InvalidConfig(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if self.batch_size == 0 {
            return Err(AgentError::InvalidConfig("batch_size must be positive".into()));
        }
        if self.retrain_every == 0 {
            return Err(AgentError::InvalidConfig("retrain_every must be positive".into()));
        }
        if self.buffer_capacity < self.batch_size {
            return Err(AgentError::InvalidConfig(format!(
                "buffer_capacity {} cannot hold a batch of {}",
                self.buffer_capacity, self.batch_size
            )));
        }
        Ok(())
    }

    /// The learner's share of the configuration.
    pub fn learner_config(&self) -> LearnerConfig {
        LearnerConfig {
            gamma: self.gamma,
            batch_size: self.batch_size,
            retrain_every: self.retrain_every,
            buffer_capacity: self.buffer_capacity,
        }
    }
}
