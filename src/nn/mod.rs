//! Feature encoding and function approximation.
//!
//! ## Overview
//!
//! - **Encoding**: `encode_state`, `encode_action`, `rank_actions` over fixed one-hot slots
//! - **Capability**: `ActionValueApproximator` (predict / fit / snapshot)
//! - **Backends**: `LinearApproximator`, `ConstantValues` for testing
//! - **Persistence**: `Checkpoint`
//!
//! ## Usage
//!
//! ```
//! use schafkopf_rl::core::Card;
//! use schafkopf_rl::nn::{encode_state, ActionValueApproximator, LinearApproximator};
//!
//! let hand: Vec<Card> = ["hz", "es"].iter().map(|c| c.parse().unwrap()).collect();
//! let state = encode_state(&hand, &[]);
//!
//! let network = LinearApproximator::new(42);
//! let values = network.predict_one(state).unwrap();
//! assert_eq!(values.len(), 32);
//! ```

pub mod checkpoint;
pub mod encoder;
pub mod linear;
pub mod traits;

// Re-export main types
pub use checkpoint::{Checkpoint, CHECKPOINT_VERSION};
pub use encoder::{
    decode_action, encode_action, encode_state, rank_actions, ActionValues, ActionVector,
    StateVector, ACTION_SIZE, MAX_TRICK_SLOTS, STATE_SIZE,
};
pub use linear::LinearApproximator;
pub use traits::{ActionValueApproximator, ConstantValues, ParameterTensor, Parameters};
