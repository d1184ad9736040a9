//! Epsilon-greedy card selection under a legality mask.

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AgentRng, Card};
use crate::error::{AgentError, Result};
use crate::nn::{rank_actions, ActionValueApproximator, StateVector};

/// External rules predicate: may `card` be played from `hand` onto `trick`?
///
/// Must be pure for the duration of one decision. Closures with the
/// matching signature implement this trait.
pub trait LegalityOracle {
    fn is_legal(&self, card: Card, hand: &[Card], trick: &[Card]) -> bool;
}

impl<F> LegalityOracle for F
where
    F: Fn(Card, &[Card], &[Card]) -> bool,
{
    fn is_legal(&self, card: Card, hand: &[Card], trick: &[Card]) -> bool {
        self(card, hand, trick)
    }
}

/// Outcome of one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub card: Card,
    /// Whether the card came from the random branch.
    pub explored: bool,
}

/// Chooses a card with probability ε uniformly among legal cards, and
/// otherwise the highest-valued legal card held.
#[derive(Clone, Debug)]
pub struct ActionSelector {
    epsilon: f64,
    rng: AgentRng,
}

impl ActionSelector {
    pub fn new(epsilon: f64, rng: AgentRng) -> Self {
        Self { epsilon, rng }
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Change the exploration rate; values are clamped to `[0, 1]`.
    ///
    /// NaN is rejected and leaves the rate unchanged.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        if epsilon.is_nan() {
            return Err(AgentError::InvalidConfig("epsilon must not be NaN".to_string()));
        }
        self.epsilon = epsilon.clamp(0.0, 1.0);
        Ok(())
    }

    /// Pick a card for `state` (the encoding of `hand` and `trick`).
    ///
    /// The approximator is only queried on the greedy branch.
    pub fn select<A, L>(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        rules: &L,
        state: StateVector,
        online: &A,
    ) -> Result<Selection>
    where
        A: ActionValueApproximator + ?Sized,
        L: LegalityOracle + ?Sized,
    {
        let u = self.rng.gen_unit();
        let explored = self.epsilon > 0.0 && u <= self.epsilon;

        let card = if explored {
            self.explore(hand, trick, rules)
        } else {
            Self::exploit(hand, trick, rules, state, online)?
        };

        match card {
            Some(card) => {
                trace!(card = %card, explored, "card selected");
                Ok(Selection { card, explored })
            }
            None => Err(AgentError::NoLegalAction {
                hand: SmallVec::from_slice(hand),
                trick: trick.iter().copied().collect(),
            }),
        }
    }

    fn explore<L>(&mut self, hand: &[Card], trick: &[Card], rules: &L) -> Option<Card>
    where
        L: LegalityOracle + ?Sized,
    {
        let mut candidates: SmallVec<[Card; 8]> = SmallVec::from_slice(hand);
        self.rng.shuffle(&mut candidates);
        candidates
            .into_iter()
            .find(|&card| rules.is_legal(card, hand, trick))
    }

    fn exploit<A, L>(
        hand: &[Card],
        trick: &[Card],
        rules: &L,
        state: StateVector,
        online: &A,
    ) -> Result<Option<Card>>
    where
        A: ActionValueApproximator + ?Sized,
        L: LegalityOracle + ?Sized,
    {
        let values = online.predict_one(state)?;
        Ok(rank_actions(&values)
            .into_iter()
            .filter_map(Card::from_index)
            .find(|card| hand.contains(card) && rules.is_legal(*card, hand, trick)))
    }
}
