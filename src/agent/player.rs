//! Seat-level agent interface used by game drivers.

use smallvec::SmallVec;

use crate::core::{AgentRng, Card, PlayerRole};
use crate::error::{AgentError, Result};
use crate::nn::ActionValueApproximator;

use super::dqn::DqnAgent;
use super::selector::LegalityOracle;

/// Anything that can sit at the table and play cards.
///
/// Drivers call `notify_new_game` before the first card of every game,
/// `play_card` whenever the seat is to act, and `notify_game_result` once
/// the game is scored.
pub trait PlayerAgent {
    /// Who owns this seat's decisions.
    fn role(&self) -> PlayerRole;

    /// Pick a legal card from `hand` given the cards already in `trick`.
    fn play_card(&mut self, hand: &[Card], trick: &[Card], rules: &dyn LegalityOracle)
        -> Result<Card>;

    fn notify_new_game(&mut self) {}

    /// A trick was completed. `relative_taker` is the taker's seat offset
    /// from this agent (0 = this agent).
    fn notify_trick_result(&mut self, _trick: &[Card], _relative_taker: i8) {}

    /// The game was scored. `partner_score` is `None` when playing alone.
    fn notify_game_result(
        &mut self,
        _won: bool,
        _own_score: u32,
        _partner_score: Option<u32>,
    ) -> Result<()> {
        Ok(())
    }
}

impl<A: ActionValueApproximator> PlayerAgent for DqnAgent<A> {
    fn role(&self) -> PlayerRole {
        PlayerRole::Learner
    }

    fn play_card(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        rules: &dyn LegalityOracle,
    ) -> Result<Card> {
        self.decide(hand, trick, rules)
    }

    fn notify_new_game(&mut self) {
        self.reset_episode();
    }

    fn notify_game_result(
        &mut self,
        won: bool,
        own_score: u32,
        partner_score: Option<u32>,
    ) -> Result<()> {
        self.report_result(won, own_score, partner_score).map(|_| ())
    }
}

/// Plays a uniformly random legal card.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: AgentRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: AgentRng::new(seed),
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn role(&self) -> PlayerRole {
        PlayerRole::Scripted
    }

    fn play_card(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        rules: &dyn LegalityOracle,
    ) -> Result<Card> {
        let legal: SmallVec<[Card; 8]> = hand
            .iter()
            .copied()
            .filter(|&card| rules.is_legal(card, hand, trick))
            .collect();

        self.rng
            .choose(&legal)
            .copied()
            .ok_or_else(|| AgentError::NoLegalAction {
                hand: SmallVec::from_slice(hand),
                trick: trick.iter().copied().collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{DqnConfig, EpisodePhase};
    use crate::core::Suit;
    use crate::nn::ConstantValues;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|c| c.parse().unwrap()).collect()
    }

    fn no_eichel(card: Card, _: &[Card], _: &[Card]) -> bool {
        card.suit != Suit::Eichel
    }

    #[test]
    fn test_roles() {
        let dqn = DqnAgent::new(
            ConstantValues::zeros(),
            ConstantValues::zeros(),
            DqnConfig::default(),
        )
        .unwrap();
        assert_eq!(dqn.role(), PlayerRole::Learner);
        assert!(dqn.role().learns());
        assert_eq!(RandomAgent::new(0).role(), PlayerRole::Scripted);
    }

    #[test]
    fn test_random_agent_plays_legal() {
        let mut agent = RandomAgent::new(9);
        let hand = cards(&["eo", "es", "h9", "g7"]);
        for _ in 0..50 {
            let card = agent.play_card(&hand, &[], &no_eichel).unwrap();
            assert_ne!(card.suit, Suit::Eichel);
            assert!(hand.contains(&card));
        }
    }

    #[test]
    fn test_random_agent_no_legal() {
        let mut agent = RandomAgent::new(9);
        let result = agent.play_card(&cards(&["eo", "es"]), &[], &no_eichel);
        assert!(matches!(result, Err(AgentError::NoLegalAction { .. })));
    }

    #[test]
    fn test_dqn_through_trait() {
        let mut agent: Box<dyn PlayerAgent> = Box::new(
            DqnAgent::new(
                ConstantValues::zeros(),
                ConstantValues::zeros(),
                DqnConfig::default(),
            )
            .unwrap(),
        );

        agent.notify_new_game();
        let card = agent
            .play_card(&cards(&["eo", "h9"]), &[], &no_eichel)
            .unwrap();
        assert_eq!(card.code(), "h9");
        agent.notify_trick_result(&cards(&["h9", "hk", "hs", "h7"]), 2);
        agent.notify_game_result(false, 20, Some(35)).unwrap();
    }

    #[test]
    fn test_new_game_resets_dqn_episode() {
        let mut agent = DqnAgent::new(
            ConstantValues::zeros(),
            ConstantValues::zeros(),
            DqnConfig::default(),
        )
        .unwrap();
        agent.play_card(&cards(&["h9"]), &[], &no_eichel).unwrap();
        agent.notify_game_result(true, 70, None).unwrap();
        assert_eq!(agent.phase(), EpisodePhase::Terminal);

        PlayerAgent::notify_new_game(&mut agent);
        assert_eq!(agent.phase(), EpisodePhase::Idle);
    }
}
