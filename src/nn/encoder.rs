//! Card/feature codec.
//!
//! Projects a decision point (own hand plus the cards already in the
//! current trick) onto fixed one-hot slots, and maps single cards to
//! one-hot actions.
//!
//! ## State layout (128 flags)
//!
//! | Slots       | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `0..32`     | cards in the acting player's hand         |
//! | `32..64`    | first card played into the current trick  |
//! | `64..96`    | second card played into the current trick |
//! | `96..128`   | third card played into the current trick  |
//!
//! Within each 32-slot block a card occupies `Card::index()`.

use serde::{Deserialize, Serialize};

use crate::core::{Card, DECK_SIZE};

/// Length of the state vector.
pub const STATE_SIZE: usize = DECK_SIZE * 4;

/// Length of the action vector (one slot per card).
pub const ACTION_SIZE: usize = DECK_SIZE;

/// Maximum number of trick cards visible to the acting player.
pub const MAX_TRICK_SLOTS: usize = 3;

/// Predicted value for each of the 32 actions.
pub type ActionValues = [f32; ACTION_SIZE];

/// Encoded observation: 128 presence flags stored as a bit set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateVector(u128);

impl StateVector {
    /// The empty table: no hand, no trick. Used as the successor of every
    /// terminal transition.
    pub const EMPTY: StateVector = StateVector(0);

    /// Whether the flag at `slot` is set. Slots past 127 read as unset.
    #[must_use]
    pub fn get(self, slot: usize) -> bool {
        slot < STATE_SIZE && self.0 & (1u128 << slot) != 0
    }

    fn set(&mut self, slot: usize) {
        debug_assert!(slot < STATE_SIZE);
        self.0 |= 1u128 << slot;
    }

    /// Number of set flags.
    #[must_use]
    pub fn count_set(self) -> u32 {
        self.0.count_ones()
    }

    /// Indices of all set flags, ascending.
    pub fn set_slots(self) -> impl Iterator<Item = usize> {
        (0..STATE_SIZE).filter(move |&slot| self.get(slot))
    }

    /// Dense numeric form for approximator input.
    #[must_use]
    pub fn to_dense(self) -> [f32; STATE_SIZE] {
        let mut dense = [0.0; STATE_SIZE];
        for slot in self.set_slots() {
            dense[slot] = 1.0;
        }
        dense
    }

    /// Raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u128 {
        self.0
    }
}

/// One-hot action over the 32 cards, stored as a bit set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionVector(u32);

impl ActionVector {
    /// Dense numeric form.
    #[must_use]
    pub fn to_dense(self) -> ActionValues {
        let mut dense = [0.0; ACTION_SIZE];
        dense[decode_action(self)] = 1.0;
        dense
    }

    /// Raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Encode a decision point.
///
/// The hand is treated as a set; trick cards occupy slots in play order.
/// No legality checking happens here.
///
/// # Panics
///
/// Panics if the trick holds more than three cards, since the acting player
/// always sees at most three earlier plays.
#[must_use]
pub fn encode_state(hand: &[Card], trick: &[Card]) -> StateVector {
    assert!(
        trick.len() <= MAX_TRICK_SLOTS,
        "trick has {} cards, at most {} can precede a decision",
        trick.len(),
        MAX_TRICK_SLOTS
    );

    let mut state = StateVector::EMPTY;
    for card in hand {
        state.set(card.index());
    }
    for (position, card) in trick.iter().enumerate() {
        state.set((position + 1) * DECK_SIZE + card.index());
    }
    state
}

/// Encode a card as a one-hot action.
#[must_use]
pub fn encode_action(card: Card) -> ActionVector {
    ActionVector(1u32 << card.index())
}

/// Index of the card an action selects.
#[must_use]
pub fn decode_action(action: ActionVector) -> usize {
    action.0.trailing_zeros() as usize
}

/// Action indices ordered by descending value.
///
/// Ties keep ascending index order, so the ranking is deterministic for a
/// given value vector.
#[must_use]
pub fn rank_actions(values: &ActionValues) -> [usize; ACTION_SIZE] {
    let mut order: [usize; ACTION_SIZE] = std::array::from_fn(|i| i);
    // Stable sort: equal values stay in index order.
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}
