//! Agent bindings for Python.

use std::cell::RefCell;

use pyo3::prelude::*;

use crate::agent::{DqnAgent, DqnConfig, EpisodePhase};
use crate::core::Card;
use crate::training::TrainingReport;

use super::py_core::PyCard;
use super::py_nn::PyApproximator;

/// Python wrapper for DqnConfig.
#[pyclass(name = "DqnConfig")]
#[derive(Clone)]
pub struct PyDqnConfig(pub DqnConfig);

#[pymethods]
impl PyDqnConfig {
    /// Create a new agent configuration.
    ///
    /// # Arguments
    /// - gamma: Discount factor (default: 0.6)
    /// - epsilon: Exploration rate (default: 0.1)
    /// - buffer_capacity: Replay buffer size (default: 2000)
    /// - batch_size: Training minibatch size (default: 32)
    /// - retrain_every: Transitions between training steps (default: 16)
    /// - seed: Random seed (default: 42)
    #[new]
    #[pyo3(signature = (
        gamma = 0.6,
        epsilon = 0.1,
        buffer_capacity = 2000,
        batch_size = 32,
        retrain_every = 16,
        seed = 42
    ))]
    fn new(
        gamma: f32,
        epsilon: f64,
        buffer_capacity: usize,
        batch_size: usize,
        retrain_every: usize,
        seed: u64,
    ) -> PyResult<Self> {
        let config = DqnConfig::default()
            .with_gamma(gamma)
            .with_epsilon(epsilon)
            .with_buffer_capacity(buffer_capacity)
            .with_batch_size(batch_size)
            .with_retrain_every(retrain_every)
            .with_seed(seed);
        config.validate()?;
        Ok(Self(config))
    }

    #[getter]
    fn gamma(&self) -> f32 {
        self.0.gamma
    }

    #[getter]
    fn epsilon(&self) -> f64 {
        self.0.epsilon
    }

    #[getter]
    fn buffer_capacity(&self) -> usize {
        self.0.buffer_capacity
    }

    #[getter]
    fn batch_size(&self) -> usize {
        self.0.batch_size
    }

    #[getter]
    fn retrain_every(&self) -> usize {
        self.0.retrain_every
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    fn __repr__(&self) -> String {
        format!(
            "DqnConfig(gamma={}, epsilon={}, buffer_capacity={}, batch_size={}, retrain_every={}, seed={})",
            self.0.gamma,
            self.0.epsilon,
            self.0.buffer_capacity,
            self.0.batch_size,
            self.0.retrain_every,
            self.0.seed
        )
    }
}

/// Python wrapper for TrainingReport.
#[pyclass(name = "TrainingReport")]
#[derive(Clone)]
pub struct PyTrainingReport(pub TrainingReport);

#[pymethods]
impl PyTrainingReport {
    #[getter]
    fn step(&self) -> u64 {
        self.0.step
    }

    #[getter]
    fn loss(&self) -> f32 {
        self.0.loss
    }

    #[getter]
    fn mean_target(&self) -> f32 {
        self.0.mean_target
    }

    #[getter]
    fn terminal_samples(&self) -> usize {
        self.0.terminal_samples
    }

    fn __repr__(&self) -> String {
        format!(
            "TrainingReport(step={}, loss={:.5}, mean_target={:.4}, terminal_samples={})",
            self.0.step, self.0.loss, self.0.mean_target, self.0.terminal_samples
        )
    }
}

/// DQN agent backed by two Python models.
#[pyclass(name = "DqnAgent")]
pub struct PyDqnAgent {
    inner: DqnAgent<PyApproximator>,
}

#[pymethods]
impl PyDqnAgent {
    /// Create an agent from an online and a target model.
    ///
    /// Both models must share one architecture; the target's weights are
    /// overwritten with the online weights.
    #[new]
    #[pyo3(signature = (online, target, config = None))]
    fn new(online: PyObject, target: PyObject, config: Option<PyDqnConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.0).unwrap_or_default();
        let inner = DqnAgent::new(
            PyApproximator::new(online),
            PyApproximator::new(target),
            config,
        )?;
        Ok(Self { inner })
    }

    /// Choose a card to play.
    ///
    /// `is_legal(card, hand, trick) -> bool` is called for candidate cards.
    /// An exception it raises aborts the decision and is re-raised here.
    fn decide(
        &mut self,
        py: Python<'_>,
        hand: Vec<PyCard>,
        trick: Vec<PyCard>,
        is_legal: PyObject,
    ) -> PyResult<PyCard> {
        let hand: Vec<Card> = hand.into_iter().map(|c| c.0).collect();
        let trick: Vec<Card> = trick.into_iter().map(|c| c.0).collect();

        let failure: RefCell<Option<PyErr>> = RefCell::new(None);
        let oracle = |card: Card, hand: &[Card], trick: &[Card]| -> bool {
            if failure.borrow().is_some() {
                return false;
            }
            let to_py = |cards: &[Card]| cards.iter().copied().map(PyCard).collect::<Vec<_>>();
            let verdict = is_legal
                .call1(py, (PyCard(card), to_py(hand), to_py(trick)))
                .and_then(|result| result.extract::<bool>(py));
            match verdict {
                Ok(legal) => legal,
                Err(err) => {
                    *failure.borrow_mut() = Some(err);
                    false
                }
            }
        };

        let decision = self.inner.decide(&hand, &trick, &oracle);
        if let Some(err) = failure.borrow_mut().take() {
            return Err(err);
        }
        Ok(PyCard(decision?))
    }

    /// Report the game outcome. Returns a report if a training step ran.
    #[pyo3(signature = (won, own_score = 0, partner_score = None))]
    fn report_result(
        &mut self,
        won: bool,
        own_score: u32,
        partner_score: Option<u32>,
    ) -> PyResult<Option<PyTrainingReport>> {
        let report = self.inner.report_result(won, own_score, partner_score)?;
        Ok(report.map(PyTrainingReport))
    }

    /// Forget the pending decision and prepare for a new game.
    fn reset_episode(&mut self) {
        self.inner.reset_episode();
    }

    /// Write the online weights to a checkpoint file.
    fn save(&self, path: &str) -> PyResult<()> {
        Ok(self.inner.save(path)?)
    }

    /// Load online weights from a checkpoint file and sync the target.
    fn load(&mut self, path: &str) -> PyResult<()> {
        Ok(self.inner.load(path)?)
    }

    #[getter]
    fn epsilon(&self) -> f64 {
        self.inner.epsilon()
    }

    #[setter]
    fn set_epsilon(&mut self, epsilon: f64) -> PyResult<()> {
        Ok(self.inner.set_epsilon(epsilon)?)
    }

    /// "idle", "awaiting_feedback" or "terminal".
    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            EpisodePhase::Idle => "idle",
            EpisodePhase::AwaitingFeedback => "awaiting_feedback",
            EpisodePhase::Terminal => "terminal",
        }
    }

    #[getter]
    fn episodes(&self) -> u64 {
        self.inner.episodes()
    }

    #[getter]
    fn training_steps(&self) -> u64 {
        self.inner.learner().training_steps()
    }

    #[getter]
    fn buffer_len(&self) -> usize {
        self.inner.learner().buffer().len()
    }

    #[getter]
    fn last_report(&self) -> Option<PyTrainingReport> {
        self.inner.last_report().cloned().map(PyTrainingReport)
    }

    #[getter]
    fn config(&self) -> PyDqnConfig {
        PyDqnConfig(self.inner.config().clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "DqnAgent(epsilon={}, episodes={}, training_steps={})",
            self.inner.epsilon(),
            self.inner.episodes(),
            self.inner.learner().training_steps()
        )
    }
}
