//! Seat identifiers and decision ownership.

use serde::{Deserialize, Serialize};

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 4;

/// Seat identifier, 0-based in clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Iterate over all seats at the table.
    ///
    /// ```
    /// use schafkopf_rl::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who owns the decisions made at a seat.
///
/// Drivers and front-ends branch on this tag rather than inspecting
/// the concrete agent type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    /// Decisions come from a person at the front-end.
    Human,
    /// Decisions come from a learning agent that expects feedback.
    Learner,
    /// Decisions come from a fixed policy (random, rule-based).
    Scripted,
}

impl PlayerRole {
    #[must_use]
    pub const fn is_human(self) -> bool {
        matches!(self, PlayerRole::Human)
    }

    /// Whether the seat's agent consumes game results for training.
    #[must_use]
    pub const fn learns(self) -> bool {
        matches!(self, PlayerRole::Learner)
    }
}
