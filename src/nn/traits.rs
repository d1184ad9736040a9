//! Function approximator capability.
//!
//! The learner only ever talks to approximators through this trait, so
//! the backend (pure Rust, Python, anything else) stays swappable. Raw
//! parameter access is limited to whole-snapshot copies.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

use super::encoder::{ActionValues, StateVector, ACTION_SIZE};

/// One block of parameters (e.g. a weight matrix) in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterTensor {
    /// Flattened values.
    pub data: Vec<f32>,

    /// Shape of the tensor (e.g. `[rows, cols]`).
    pub shape: Vec<usize>,
}

impl ParameterTensor {
    /// Create a tensor. Length must equal the shape product.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            data.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { data, shape }
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            data: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fail unless the value count equals the shape product.
    ///
    /// Deserialized tensors skip the check in [`ParameterTensor::new`].
    pub fn check_len(&self) -> Result<()> {
        let expected = self.shape.iter().product::<usize>();
        if self.data.len() != expected {
            return Err(AgentError::MalformedTensor {
                shape: self.shape.clone(),
                expected,
                found: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Full parameter snapshot of an approximator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub tensors: Vec<ParameterTensor>,
}

impl Parameters {
    pub fn new(tensors: Vec<ParameterTensor>) -> Self {
        Self { tensors }
    }

    /// Shapes of all tensors, in order.
    #[must_use]
    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.tensors.iter().map(|t| t.shape.clone()).collect()
    }

    /// Total number of scalar parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensors.iter().map(ParameterTensor::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail unless `other` has exactly the same tensor shapes and every
    /// tensor of `other` holds as many values as its shape says.
    pub fn check_compatible(&self, other: &Parameters) -> Result<()> {
        let expected = self.shapes();
        let found = other.shapes();
        if expected != found {
            return Err(AgentError::ParameterMismatch { expected, found });
        }
        other.tensors.iter().try_for_each(ParameterTensor::check_len)
    }
}

/// Maps encoded states to one value estimate per action.
///
/// ## Contract
///
/// - `predict` returns exactly one [`ActionValues`] per input state and
///   does not change the approximator.
/// - `fit` performs a single optimization pass over the given pairs and
///   returns the training loss the backend reports.
/// - `parameters` / `set_parameters` copy complete snapshots; after
///   `b.set_parameters(&a.parameters()?)`, `b` predicts exactly as `a` does.
pub trait ActionValueApproximator {
    /// Predict action values for a batch of states.
    fn predict(&self, states: &[StateVector]) -> Result<Vec<ActionValues>>;

    /// Run one update pass towards `labels` (one label row per state).
    fn fit(&mut self, states: &[StateVector], labels: &[ActionValues]) -> Result<f32>;

    /// Snapshot all parameters.
    fn parameters(&self) -> Result<Parameters>;

    /// Replace all parameters with a snapshot.
    fn set_parameters(&mut self, parameters: &Parameters) -> Result<()>;

    /// Convenience: values for a single state.
    fn predict_one(&self, state: StateVector) -> Result<ActionValues> {
        self.predict(std::slice::from_ref(&state))?
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Approximator("empty prediction batch".to_string()))
    }
}

/// Approximator that always predicts the same values and never learns.
///
/// Baseline for tests and for driving the selector with a known ranking.
/// Its only "parameters" are the value vector itself, so snapshots still
/// round-trip.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantValues {
    values: ActionValues,
    fit_calls: usize,
}

impl ConstantValues {
    pub fn new(values: ActionValues) -> Self {
        Self {
            values,
            fit_calls: 0,
        }
    }

    /// All actions valued equally; ranking falls back to index order.
    pub fn zeros() -> Self {
        Self::new([0.0; ACTION_SIZE])
    }

    #[must_use]
    pub fn values(&self) -> &ActionValues {
        &self.values
    }

    /// Number of times `fit` was invoked.
    #[must_use]
    pub fn fit_calls(&self) -> usize {
        self.fit_calls
    }
}

impl ActionValueApproximator for ConstantValues {
    fn predict(&self, states: &[StateVector]) -> Result<Vec<ActionValues>> {
        Ok(vec![self.values; states.len()])
    }

    fn fit(&mut self, _states: &[StateVector], _labels: &[ActionValues]) -> Result<f32> {
        self.fit_calls += 1;
        Ok(0.0)
    }

    fn parameters(&self) -> Result<Parameters> {
        Ok(Parameters::new(vec![ParameterTensor::new(
            self.values.to_vec(),
            vec![ACTION_SIZE],
        )]))
    }

    fn set_parameters(&mut self, parameters: &Parameters) -> Result<()> {
        self.parameters()?.check_compatible(parameters)?;
        self.values.copy_from_slice(&parameters.tensors[0].data);
        Ok(())
    }
}
