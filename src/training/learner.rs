//! Temporal-difference learner with a lagged target approximator.
//!
//! Owns the replay buffer and both approximators. Every delivered
//! transition is stored; a training step runs only once `retrain_every`
//! transitions have arrived since the last step *and* the buffer holds a
//! full minibatch.
//!
//! ## Training step
//!
//! For a sampled minibatch:
//!
//! ```text
//! Q_curr = online.predict(states)
//! Q_next = target.predict(next_states)
//! y_i    = r_i                          if terminal_i
//!        = r_i + γ · max_a Q_next[i][a]  otherwise
//! label_i = Q_curr[i] with column a_i replaced by y_i
//! online.fit(states, labels)
//! ```
//!
//! Only the taken action's column carries an error, so the update is a
//! semi-gradient, action-masked TD(0). Illegal actions are never
//! corrected here; masking happens at selection time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::AgentRng;
use crate::error::{AgentError, Result};
use crate::nn::{decode_action, ActionValueApproximator, ActionValues, Parameters, StateVector};

use super::replay::ReplayBuffer;
use super::transition::Transition;

/// Learner hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Discount factor for bootstrapped values (default: 0.6).
    ///
    /// At most eight decisions separate any state from the reward, so a
    /// short horizon suffices.
    pub gamma: f32,

    /// Transitions per training minibatch (default: 32).
    pub batch_size: usize,

    /// Transitions to collect between training steps (default: 16).
    pub retrain_every: usize,

    /// Replay buffer capacity (default: 2000).
    pub buffer_capacity: usize,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            gamma: 0.6,
            batch_size: 32,
            retrain_every: 16,
            buffer_capacity: 2000,
        }
    }
}

/// Summary of one completed training step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// 1-based index of this step.
    pub step: u64,

    /// Loss reported by the online approximator's `fit`.
    pub loss: f32,

    /// Mean TD target over the minibatch.
    pub mean_target: f32,

    /// Terminal transitions in the minibatch.
    pub terminal_samples: usize,
}

/// Owns experience and both approximators.
#[derive(Debug)]
pub struct Learner<A> {
    online: A,
    target: A,
    buffer: ReplayBuffer,
    config: LearnerConfig,
    rng: AgentRng,
    since_last_train: usize,
    training_steps: u64,
    target_syncs: u64,
}

impl<A: ActionValueApproximator> Learner<A> {
    /// Create a learner. The target starts as an exact copy of `online`.
    pub fn new(online: A, target: A, config: LearnerConfig, rng: AgentRng) -> Result<Self> {
        let mut learner = Self {
            online,
            target,
            buffer: ReplayBuffer::new(config.buffer_capacity),
            config,
            rng,
            since_last_train: 0,
            training_steps: 0,
            target_syncs: 0,
        };
        learner.sync_target()?;
        Ok(learner)
    }

    /// Store a transition and train if the cadence and buffer size allow.
    ///
    /// Returns `Ok(None)` when training is deferred.
    pub fn observe(&mut self, transition: Transition) -> Result<Option<TrainingReport>> {
        self.buffer.push(transition);
        self.since_last_train += 1;

        if self.since_last_train < self.config.retrain_every {
            return Ok(None);
        }
        if self.buffer.len() < self.config.batch_size {
            return Ok(None);
        }

        self.since_last_train = 0;
        self.train_step().map(Some)
    }

    /// Run one training step on a fresh minibatch.
    ///
    /// Fails if the buffer holds fewer than `batch_size` transitions.
    pub fn train_step(&mut self) -> Result<TrainingReport> {
        let batch_size = self.config.batch_size;
        if batch_size == 0 || self.buffer.len() < batch_size {
            return Err(AgentError::InvalidConfig(format!(
                "training needs {} transitions, buffer holds {}",
                batch_size,
                self.buffer.len()
            )));
        }

        let batch = self.buffer.sample(batch_size, &mut self.rng);
        let states: Vec<StateVector> = batch.iter().map(Transition::state).collect();
        let next_states: Vec<StateVector> = batch.iter().map(Transition::next_state).collect();

        let q_curr = self.online.predict(&states)?;
        let q_next = self.target.predict(&next_states)?;
        if q_curr.len() != batch_size || q_next.len() != batch_size {
            return Err(AgentError::Approximator(format!(
                "predicted {} / {} rows for a batch of {}",
                q_curr.len(),
                q_next.len(),
                batch_size
            )));
        }

        let (labels, targets) = td_labels(&batch, q_curr, &q_next, self.config.gamma);
        let loss = self.online.fit(&states, &labels)?;

        self.training_steps += 1;
        let report = TrainingReport {
            step: self.training_steps,
            loss,
            mean_target: targets.iter().sum::<f32>() / targets.len() as f32,
            terminal_samples: batch.iter().filter(|t| t.is_terminal()).count(),
        };
        debug!(
            step = report.step,
            loss = report.loss,
            mean_target = report.mean_target,
            terminal_samples = report.terminal_samples,
            "training step"
        );
        Ok(report)
    }

    /// Copy the online parameters into the target verbatim.
    pub fn sync_target(&mut self) -> Result<()> {
        let snapshot = self.online.parameters()?;
        self.target.set_parameters(&snapshot)?;
        self.target_syncs += 1;
        debug!(syncs = self.target_syncs, "target synced");
        Ok(())
    }

    /// Replace the online parameters and resync the target.
    pub fn load_online(&mut self, parameters: &Parameters) -> Result<()> {
        self.online.set_parameters(parameters)?;
        self.sync_target()
    }

    pub fn online(&self) -> &A {
        &self.online
    }

    pub fn target(&self) -> &A {
        &self.target
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Completed training steps.
    pub fn training_steps(&self) -> u64 {
        self.training_steps
    }

    /// Completed target syncs, including the one at construction.
    pub fn target_syncs(&self) -> u64 {
        self.target_syncs
    }

    /// Transitions received since the last training step.
    pub fn pending_transitions(&self) -> usize {
        self.since_last_train
    }
}

/// Build training labels from online predictions and target bootstraps.
///
/// Returns the label rows and the per-sample TD targets.
fn td_labels(
    batch: &[Transition],
    mut q_curr: Vec<ActionValues>,
    q_next: &[ActionValues],
    gamma: f32,
) -> (Vec<ActionValues>, Vec<f32>) {
    let targets: Vec<f32> = batch
        .iter()
        .zip(q_next)
        .map(|(t, next)| {
            if t.is_terminal() {
                t.reward()
            } else {
                let best = next.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                t.reward() + gamma * best
            }
        })
        .collect();

    for ((row, t), &target) in q_curr.iter_mut().zip(batch).zip(&targets) {
        row[decode_action(t.action())] = target;
    }
    (q_curr, targets)
}
