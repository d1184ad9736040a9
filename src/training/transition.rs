//! One recorded experience step.

use serde::{Deserialize, Serialize};

use crate::nn::{ActionVector, StateVector};

/// `(state, action, reward, next_state, terminal)`.
///
/// Fields are private; a transition is frozen once built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    state: StateVector,
    action: ActionVector,
    reward: f32,
    next_state: StateVector,
    terminal: bool,
}

impl Transition {
    /// Intermediate step: zero reward, not terminal.
    pub fn step(state: StateVector, action: ActionVector, next_state: StateVector) -> Self {
        Self {
            state,
            action,
            reward: 0.0,
            next_state,
            terminal: false,
        }
    }

    /// Final step of an episode. The successor is the empty table.
    pub fn terminal(state: StateVector, action: ActionVector, reward: f32) -> Self {
        Self {
            state,
            action,
            reward,
            next_state: StateVector::EMPTY,
            terminal: true,
        }
    }

    #[must_use]
    pub fn state(&self) -> StateVector {
        self.state
    }

    #[must_use]
    pub fn action(&self) -> ActionVector {
        self.action
    }

    #[must_use]
    pub fn reward(&self) -> f32 {
        self.reward
    }

    #[must_use]
    pub fn next_state(&self) -> StateVector {
        self.next_state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}
