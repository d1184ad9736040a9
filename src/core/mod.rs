//! Core types: cards, seats, RNG.
//!
//! These are the game-facing building blocks shared by the encoder,
//! the learner and the agents.

pub mod card;
pub mod player;
pub mod rng;

pub use card::{Card, Pip, Suit, DECK_SIZE};
pub use player::{PlayerId, PlayerRole, PLAYER_COUNT};
pub use rng::AgentRng;
