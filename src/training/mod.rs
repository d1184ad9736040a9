//! Experience storage and value learning.
//!
//! ## Overview
//!
//! - **Transition**: One `(state, action, reward, next_state, terminal)` record
//! - **ReplayBuffer**: FIFO store sampled uniformly with replacement
//! - **Learner**: TD(0) updates of the online approximator, target syncs
//!
//! ## Usage
//!
//! ```
//! use schafkopf_rl::core::{AgentRng, Card};
//! use schafkopf_rl::nn::{encode_action, encode_state, LinearApproximator};
//! use schafkopf_rl::training::{Learner, LearnerConfig, Transition};
//!
//! let mut learner = Learner::new(
//!     LinearApproximator::new(1),
//!     LinearApproximator::new(2),
//!     LearnerConfig::default(),
//!     AgentRng::new(42),
//! )
//! .unwrap();
//!
//! let card: Card = "hz".parse().unwrap();
//! let state = encode_state(&[card], &[]);
//! let report = learner
//!     .observe(Transition::terminal(state, encode_action(card), 1.0))
//!     .unwrap();
//!
//! // Far below the minibatch size: training is deferred.
//! assert!(report.is_none());
//! ```

pub mod learner;
pub mod replay;
pub mod transition;

// Re-export main types
pub use learner::{Learner, LearnerConfig, TrainingReport};
pub use replay::ReplayBuffer;
pub use transition::Transition;
