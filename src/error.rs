//! Error type shared by the agent, learner and persistence layer.

use smallvec::SmallVec;
use thiserror::Error;

use crate::core::Card;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Everything that can go wrong inside the agent.
///
/// None of these are transient: every variant is a contract violation by the
/// caller, a defect in a collaborator, or a persistence failure. Nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No card in the hand satisfies the legality oracle. Indicates a broken
    /// oracle or a corrupted hand; always fatal.
    #[error("no legal card in hand {hand:?} for trick {trick:?}")]
    NoLegalAction {
        hand: SmallVec<[Card; 8]>,
        trick: SmallVec<[Card; 3]>,
    },

    /// A decision was requested after the result was reported but before
    /// the next game was announced.
    #[error("episode is terminal; reset_episode() must be called before the next decision")]
    EpisodeTerminal,

    /// A result was reported before any decision of the episode.
    #[error("no pending decision to credit with the game result")]
    NoPendingDecision,

    /// A result was reported twice for the same episode.
    #[error("game result already reported for this episode")]
    ResultAlreadyReported,

    /// Parameter snapshot does not match the receiving approximator.
    #[error("parameter shape mismatch: expected {expected:?}, found {found:?}")]
    ParameterMismatch {
        expected: Vec<Vec<usize>>,
        found: Vec<Vec<usize>>,
    },

    /// A tensor whose value count disagrees with its own shape.
    #[error("malformed tensor: shape {shape:?} needs {expected} values, found {found}")]
    MalformedTensor {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },

    /// Backend failure inside an approximator.
    #[error("approximator failure: {0}")]
    Approximator(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid card code '{0}'")]
    InvalidCardCode(String),

    #[error("checkpoint i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint encoding failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("unsupported checkpoint format version {found} (expected {expected})")]
    CheckpointFormat { expected: u32, found: u32 },

    /// The checkpoint was written with a different card index ordering.
    #[error("checkpoint card ordering does not match this build")]
    CardOrderMismatch,
}

impl AgentError {
    /// Whether the error stems from calling the agent out of order.
    ///
    /// Usage errors leave the agent intact; the caller can recover by
    /// resetting the episode.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            AgentError::EpisodeTerminal
                | AgentError::NoPendingDecision
                | AgentError::ResultAlreadyReported
        )
    }
}
