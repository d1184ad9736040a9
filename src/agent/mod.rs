//! The learning agent and its seat-level interface.
//!
//! ## Overview
//!
//! - **DqnConfig**: Hyperparameters with builder methods
//! - **ActionSelector**: ε-greedy choice restricted to legal cards
//! - **EpisodeController**: Deferred-reward state machine for one game
//! - **DqnAgent**: Decision entry point, result reporting, checkpoints
//! - **PlayerAgent**: Interface shared with scripted seats such as `RandomAgent`

pub mod config;
pub mod dqn;
pub mod episode;
pub mod player;
pub mod selector;

// Re-export main types
pub use config::DqnConfig;
pub use dqn::DqnAgent;
pub use episode::{outcome_reward, EpisodeController, EpisodePhase, PendingDecision};
pub use player::{PlayerAgent, RandomAgent};
pub use selector::{ActionSelector, LegalityOracle, Selection};
