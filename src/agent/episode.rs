//! Episode state machine for deferred reward.
//!
//! ```text
//!            record                      observe (emit step transition)
//!   Idle ◀───────────▶ AwaitingFeedback
//!    ▲                        │
//!    │ reset                  │ finish (emit terminal transition)
//!    │                        ▼
//!    └──────────────────── Terminal
//! ```
//!
//! The pending `(state, action)` lives inside the `AwaitingFeedback`
//! variant, so it cannot exist in any other phase. Emitting a transition
//! consumes it: each decision is credited at most once, even when the
//! selection that follows an observation fails.

use tracing::{debug, warn};

use crate::error::{AgentError, Result};
use crate::nn::{ActionVector, StateVector};
use crate::training::Transition;

/// The one decision of the current episode not yet credited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDecision {
    pub state: StateVector,
    pub action: ActionVector,
}

/// Observable phase of the episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No decision is waiting for credit.
    Idle,
    /// A decision is waiting for the next observation or the result.
    AwaitingFeedback,
    /// The result has been credited; only a reset is accepted.
    Terminal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EpisodeState {
    Idle,
    AwaitingFeedback(PendingDecision),
    Terminal,
}

/// Tracks the pending decision across one game.
#[derive(Clone, Debug)]
pub struct EpisodeController {
    state: EpisodeState,
    decisions: usize,
}

impl Default for EpisodeController {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeController {
    pub fn new() -> Self {
        Self {
            state: EpisodeState::Idle,
            decisions: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        match self.state {
            EpisodeState::Idle => EpisodePhase::Idle,
            EpisodeState::AwaitingFeedback(_) => EpisodePhase::AwaitingFeedback,
            EpisodeState::Terminal => EpisodePhase::Terminal,
        }
    }

    /// The decision awaiting credit, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingDecision> {
        match self.state {
            EpisodeState::AwaitingFeedback(pending) => Some(pending),
            _ => None,
        }
    }

    /// Decisions recorded in the current episode.
    #[must_use]
    pub fn decisions(&self) -> usize {
        self.decisions
    }

    /// Accept a new observation ahead of a decision.
    ///
    /// Returns the zero-reward transition that credits the previous
    /// decision and returns to `Idle`, or `None` when nothing is pending.
    /// Fails with [`AgentError::EpisodeTerminal`] after the result was
    /// reported.
    pub fn observe(&mut self, observed: StateVector) -> Result<Option<Transition>> {
        match self.state {
            EpisodeState::Idle => Ok(None),
            EpisodeState::AwaitingFeedback(pending) => {
                self.state = EpisodeState::Idle;
                Ok(Some(Transition::step(
                    pending.state,
                    pending.action,
                    observed,
                )))
            }
            EpisodeState::Terminal => Err(AgentError::EpisodeTerminal),
        }
    }

    /// Store the decision just made as the pending one.
    pub fn record(&mut self, pending: PendingDecision) -> Result<()> {
        if self.state == EpisodeState::Terminal {
            return Err(AgentError::EpisodeTerminal);
        }
        self.state = EpisodeState::AwaitingFeedback(pending);
        self.decisions += 1;
        Ok(())
    }

    /// Close the episode, crediting the pending decision with `reward`.
    pub fn finish(&mut self, reward: f32) -> Result<Transition> {
        match self.state {
            EpisodeState::AwaitingFeedback(pending) => {
                self.state = EpisodeState::Terminal;
                debug!(reward, decisions = self.decisions, "episode finished");
                Ok(Transition::terminal(pending.state, pending.action, reward))
            }
            EpisodeState::Idle => Err(AgentError::NoPendingDecision),
            EpisodeState::Terminal => Err(AgentError::ResultAlreadyReported),
        }
    }

    /// Start a new episode from any phase.
    pub fn reset(&mut self) {
        if let EpisodeState::AwaitingFeedback(_) = self.state {
            warn!(
                decisions = self.decisions,
                "episode reset without a result; pending decision discarded"
            );
        }
        debug!(phase = ?self.phase(), "episode reset");
        self.state = EpisodeState::Idle;
        self.decisions = 0;
    }
}

/// Terminal reward for a finished game: 1 for a win, 0 otherwise.
///
/// Score margins are deliberately not part of the signal.
#[must_use]
pub fn outcome_reward(won: bool) -> f32 {
    if won {
        1.0
    } else {
        0.0
    }
}
