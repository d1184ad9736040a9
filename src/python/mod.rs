//! Python bindings for the Schafkopf DQN agent.
//!
//! The approximators stay in Python: any object with `predict`, `fit`,
//! `get_weights` and `set_weights` (a Keras model, or a thin wrapper around
//! one) can back the agent.
//!
//! # Quick Start
//!
//! ```python
//! import schafkopf_rl as sk
//!
//! config = sk.DqnConfig(epsilon=0.1, seed=7)
//! agent = sk.DqnAgent(online_model, target_model, config)
//!
//! hand = [sk.Card("hz"), sk.Card("eo")]
//! card = agent.decide(hand, [], lambda card, hand, trick: True)
//!
//! report = agent.report_result(won=True, own_score=72)
//! agent.reset_episode()
//! ```

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::AgentError;

mod py_agent;
mod py_core;
mod py_nn;

pub use py_agent::*;
pub use py_core::*;
pub use py_nn::*;

impl From<AgentError> for PyErr {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Io(_) => PyIOError::new_err(err.to_string()),
            AgentError::InvalidConfig(_)
            | AgentError::InvalidCardCode(_)
            | AgentError::ParameterMismatch { .. }
            | AgentError::MalformedTensor { .. }
            | AgentError::CheckpointFormat { .. }
            | AgentError::CardOrderMismatch => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// schafkopf_rl: masked-action DQN card play for Schafkopf.
#[pymodule]
fn schafkopf_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyCard>()?;

    // Agent types
    m.add_class::<PyDqnConfig>()?;
    m.add_class::<PyDqnAgent>()?;
    m.add_class::<PyTrainingReport>()?;

    Ok(())
}
