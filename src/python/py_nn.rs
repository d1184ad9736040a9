//! Python-backed action-value approximator.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::prelude::*;
use pyo3::types::PyList;

use crate::error::{AgentError, Result};
use crate::nn::{
    ActionValueApproximator, ActionValues, ParameterTensor, Parameters, StateVector, ACTION_SIZE,
    STATE_SIZE,
};

/// Wraps a Python model object.
///
/// The object must provide:
/// - `predict(states: ndarray[N, 128]) -> array-like [N, 32]`
/// - `fit(states: ndarray[N, 128], labels: ndarray[N, 32]) -> float | None`
/// - `get_weights() -> list[ndarray]`
/// - `set_weights(list[ndarray])`
///
/// Exceptions raised by the model surface as [`AgentError::Approximator`].
pub struct PyApproximator {
    model: PyObject,
}

impl PyApproximator {
    pub fn new(model: PyObject) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &PyObject {
        &self.model
    }
}

impl std::fmt::Debug for PyApproximator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyApproximator").finish_non_exhaustive()
    }
}

fn backend_error(err: PyErr) -> AgentError {
    AgentError::Approximator(err.to_string())
}

/// Row-major `[rows, D]` float32 matrix.
fn matrix<'py, const D: usize>(py: Python<'py>, rows: &[[f32; D]]) -> PyResult<Bound<'py, PyAny>> {
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    let array = PyArray1::from_vec_bound(py, flat).reshape([rows.len(), D])?;
    Ok(array.into_any())
}

fn dense_states(states: &[StateVector]) -> Vec<[f32; STATE_SIZE]> {
    states.iter().map(|s| s.to_dense()).collect()
}

fn to_action_values(rows: Vec<Vec<f32>>, expected: usize) -> Result<Vec<ActionValues>> {
    if rows.len() != expected {
        return Err(AgentError::Approximator(format!(
            "model returned {} rows for {} states",
            rows.len(),
            expected
        )));
    }
    rows.into_iter()
        .map(|row| {
            <ActionValues>::try_from(row.as_slice()).map_err(|_| {
                AgentError::Approximator(format!(
                    "model returned {} values per state, expected {}",
                    row.len(),
                    ACTION_SIZE
                ))
            })
        })
        .collect()
}

impl ActionValueApproximator for PyApproximator {
    fn predict(&self, states: &[StateVector]) -> Result<Vec<ActionValues>> {
        let rows = Python::with_gil(|py| -> PyResult<Vec<Vec<f32>>> {
            let numpy = py.import_bound("numpy")?;
            let batch = matrix(py, &dense_states(states))?;
            let out = self.model.bind(py).call_method1("predict", (batch,))?;
            numpy
                .call_method1("asarray", (out, "float32"))?
                .call_method0("tolist")?
                .extract()
        })
        .map_err(backend_error)?;

        to_action_values(rows, states.len())
    }

    fn fit(&mut self, states: &[StateVector], labels: &[ActionValues]) -> Result<f32> {
        if states.len() != labels.len() {
            return Err(AgentError::Approximator(format!(
                "{} states but {} label rows",
                states.len(),
                labels.len()
            )));
        }

        Python::with_gil(|py| -> PyResult<f32> {
            let x = matrix(py, &dense_states(states))?;
            let y = matrix(py, labels)?;
            let loss: Option<f32> = self.model.bind(py).call_method1("fit", (x, y))?.extract()?;
            Ok(loss.unwrap_or(0.0))
        })
        .map_err(backend_error)
    }

    fn parameters(&self) -> Result<Parameters> {
        Python::with_gil(|py| -> PyResult<Parameters> {
            let numpy = py.import_bound("numpy")?;
            let weights = self.model.bind(py).call_method0("get_weights")?;

            let mut tensors = Vec::new();
            for item in weights.iter()? {
                let array = numpy.call_method1("asarray", (item?, "float32"))?;
                let shape: Vec<usize> = array.getattr("shape")?.extract()?;
                let data: Vec<f32> = array.call_method0("ravel")?.call_method0("tolist")?.extract()?;
                tensors.push(ParameterTensor::new(data, shape));
            }
            Ok(Parameters::new(tensors))
        })
        .map_err(backend_error)
    }

    fn set_parameters(&mut self, parameters: &Parameters) -> Result<()> {
        self.parameters()?.check_compatible(parameters)?;

        Python::with_gil(|py| -> PyResult<()> {
            let mut arrays = Vec::with_capacity(parameters.tensors.len());
            for tensor in &parameters.tensors {
                let array =
                    PyArray1::from_vec_bound(py, tensor.data.clone()).reshape(tensor.shape.clone())?;
                arrays.push(array.into_any());
            }
            let list = PyList::new_bound(py, arrays);
            self.model.bind(py).call_method1("set_weights", (list,))?;
            Ok(())
        })
        .map_err(backend_error)
    }
}
