//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::{Card, DECK_SIZE};
use crate::error::AgentError;

/// Python wrapper for Card.
#[pyclass(name = "Card")]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    /// Parse a two-letter card code such as `"hz"` (Herz Zehn).
    #[new]
    fn new(code: &str) -> PyResult<Self> {
        Ok(Self(code.parse::<Card>()?))
    }

    /// Card with the given permanent index (0..32).
    #[staticmethod]
    fn from_index(index: usize) -> PyResult<Self> {
        Card::from_index(index).map(Self).ok_or_else(|| {
            AgentError::InvalidCardCode(format!("index {} outside 0..{}", index, DECK_SIZE)).into()
        })
    }

    /// All 32 cards in index order.
    #[staticmethod]
    fn deck() -> Vec<PyCard> {
        Card::deck().map(Self).collect()
    }

    #[getter]
    fn index(&self) -> usize {
        self.0.index()
    }

    #[getter]
    fn code(&self) -> String {
        self.0.code()
    }

    #[getter]
    fn suit(&self) -> &'static str {
        self.0.suit.name()
    }

    #[getter]
    fn pip(&self) -> &'static str {
        self.0.pip.name()
    }

    #[getter]
    fn points(&self) -> u32 {
        self.0.points()
    }

    fn __repr__(&self) -> String {
        format!("Card('{}')", self.0.code())
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.index() as u64
    }
}
