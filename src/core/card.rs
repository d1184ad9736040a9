//! Cards of the 32-card Bavarian deck.
//!
//! ## Index ordering
//!
//! Every card carries a permanent index in `0..32`:
//! `suit * 8 + (pip - 1)`, with suits ordered Schellen, Herz, Gras, Eichel
//! and pips ordered Sieben up to Sau. The index is the card's one-hot slot
//! in both state and action encodings, and it is baked into every saved
//! checkpoint. Never reorder the enums in this file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 32;

/// Card suit. Discriminants are part of the checkpoint format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Schellen = 0,
    Herz = 1,
    Gras = 2,
    Eichel = 3,
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Schellen, Suit::Herz, Suit::Gras, Suit::Eichel];

    /// Single-letter code used in card codes.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Schellen => 's',
            Suit::Herz => 'h',
            Suit::Gras => 'g',
            Suit::Eichel => 'e',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Schellen => "schellen",
            Suit::Herz => "herz",
            Suit::Gras => "gras",
            Suit::Eichel => "eichel",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card pip (rank). Discriminants start at 1 and are part of the checkpoint format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pip {
    Sieben = 1,
    Acht = 2,
    Neun = 3,
    Unter = 4,
    Ober = 5,
    Koenig = 6,
    Zehn = 7,
    Sau = 8,
}

impl Pip {
    /// All pips in index order.
    pub const ALL: [Pip; 8] = [
        Pip::Sieben,
        Pip::Acht,
        Pip::Neun,
        Pip::Unter,
        Pip::Ober,
        Pip::Koenig,
        Pip::Zehn,
        Pip::Sau,
    ];

    /// Single-letter code used in card codes.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Pip::Sieben => '7',
            Pip::Acht => '8',
            Pip::Neun => '9',
            Pip::Unter => 'u',
            Pip::Ober => 'o',
            Pip::Koenig => 'k',
            Pip::Zehn => 'z',
            Pip::Sau => 's',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Points this pip is worth when taken in a trick.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Pip::Sieben | Pip::Acht | Pip::Neun => 0,
            Pip::Unter => 2,
            Pip::Ober => 3,
            Pip::Koenig => 4,
            Pip::Zehn => 10,
            Pip::Sau => 11,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Pip::Sieben => "sieben",
            Pip::Acht => "acht",
            Pip::Neun => "neun",
            Pip::Unter => "unter",
            Pip::Ober => "ober",
            Pip::Koenig => "koenig",
            Pip::Zehn => "zehn",
            Pip::Sau => "sau",
        }
    }
}

impl fmt::Display for Pip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playing card.
///
/// Only the 32 valid cards can be constructed, so an "unknown card"
/// cannot reach the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub pip: Pip,
}

impl Card {
    /// Create a card from suit and pip.
    #[must_use]
    pub const fn new(suit: Suit, pip: Pip) -> Self {
        Self { suit, pip }
    }

    /// The permanent one-hot index of this card.
    #[must_use]
    pub const fn index(self) -> usize {
        self.suit as usize * 8 + (self.pip as usize - 1)
    }

    /// Look up a card by its one-hot index.
    ///
    /// Returns `None` for indices outside `0..32`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= DECK_SIZE {
            return None;
        }
        Some(Self::new(Suit::ALL[index / 8], Pip::ALL[index % 8]))
    }

    /// Points this card is worth.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.pip.points()
    }

    /// Two-letter code: suit letter followed by pip letter (e.g. `hz`).
    #[must_use]
    pub fn code(self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.suit.code());
        code.push(self.pip.code());
        code
    }

    /// All 32 cards in index order.
    pub fn deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Pip::ALL.into_iter().map(move |pip| Card::new(suit, pip)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.suit, self.pip)
    }
}

impl FromStr for Card {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(suit), Some(pip), None) => Suit::from_code(suit)
                .zip(Pip::from_code(pip))
                .map(|(suit, pip)| Card::new(suit, pip)),
            _ => None,
        };
        parsed.ok_or_else(|| AgentError::InvalidCardCode(s.to_string()))
    }
}
