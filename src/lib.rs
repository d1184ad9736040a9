//! # schafkopf-rl
//!
//! A masked-action DQN agent that learns card play for Schafkopf, the
//! four-player Bavarian trick-taking game, from win/loss feedback alone.
//!
//! ## Design Principles
//!
//! 1. **Rules Stay Outside**: Legality is asked of an external oracle at
//!    every decision. The agent never learns which cards are illegal; it
//!    only skips them when choosing.
//!
//! 2. **Deferred Credit**: A game's outcome is known only at the end. Each
//!    decision is held until the next observation (zero reward) or the
//!    result (terminal reward) arrives, and is then stored for replay.
//!
//! 3. **Backend-Agnostic Values**: Anything implementing
//!    [`nn::ActionValueApproximator`] can estimate action values, from the
//!    built-in linear model to a Python network behind the `python` feature.
//!
//! ## Architecture
//!
//! - **Fixed Card Order**: Each of the 32 cards owns one permanent index,
//!   shared by the 128-flag state encoding and the 32-way action space.
//!   Checkpoints record this order and refuse to load against another.
//!
//! - **Online / Target Pair**: TD targets bootstrap from a lagged copy of the
//!   online approximator, resynchronised after every game.
//!
//! - **Deterministic Randomness**: Exploration and replay sampling draw from
//!   separate seeded ChaCha streams.
//!
//! ## Modules
//!
//! - `core`: Cards, seats, RNG
//! - `nn`: State/action encoding, approximator trait, linear baseline, checkpoints
//! - `training`: Transitions, replay buffer, TD learner
//! - `agent`: Action selection, episode state machine, `DqnAgent`, `PlayerAgent`
//! - `error`: Error type shared by all modules

pub mod agent;
pub mod core;
pub mod error;
pub mod nn;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{AgentRng, Card, Pip, PlayerId, PlayerRole, Suit, DECK_SIZE};

pub use crate::error::{AgentError, Result};

pub use crate::nn::{
    encode_action, encode_state, ActionValueApproximator, ActionValues, ActionVector,
    Checkpoint, ConstantValues, LinearApproximator, Parameters, StateVector,
};

pub use crate::training::{Learner, LearnerConfig, ReplayBuffer, TrainingReport, Transition};

pub use crate::agent::{
    DqnAgent, DqnConfig, EpisodePhase, LegalityOracle, PlayerAgent, RandomAgent,
};
