//! The DQN card-play agent.
//!
//! ## Overview
//!
//! [`DqnAgent`] glues the pieces together for one seat at the table:
//!
//! - the [`ActionSelector`] picks a card (ε-greedy over legal cards)
//! - the [`EpisodeController`] remembers the last decision until it is credited
//! - the [`Learner`] stores transitions, trains on its cadence, syncs the target
//!
//! Within a game the driver calls [`DqnAgent::decide`] for every card this
//! seat plays and [`DqnAgent::report_result`] once at the end. Before the
//! next game it calls [`DqnAgent::reset_episode`].
//!
//! ## Usage
//!
//! ```
//! use schafkopf_rl::agent::{DqnAgent, DqnConfig};
//! use schafkopf_rl::core::Card;
//! use schafkopf_rl::nn::LinearApproximator;
//!
//! let config = DqnConfig::default().with_epsilon(0.0);
//! let mut agent = DqnAgent::new(
//!     LinearApproximator::new(1),
//!     LinearApproximator::new(2),
//!     config,
//! )
//! .unwrap();
//!
//! let hand: Vec<Card> = ["hz", "es"].iter().map(|c| c.parse().unwrap()).collect();
//! let any = |_: Card, _: &[Card], _: &[Card]| true;
//!
//! let card = agent.decide(&hand, &[], &any).unwrap();
//! assert!(hand.contains(&card));
//!
//! agent.report_result(true, 61, None).unwrap();
//! agent.reset_episode();
//! ```

use std::path::Path;

use tracing::debug;

use crate::core::{AgentRng, Card};
use crate::error::Result;
use crate::nn::{encode_action, encode_state, ActionValueApproximator, Checkpoint};
use crate::training::{Learner, TrainingReport};

use super::config::DqnConfig;
use super::episode::{outcome_reward, EpisodeController, EpisodePhase, PendingDecision};
use super::selector::{ActionSelector, LegalityOracle};

/// Masked-action DQN agent for one seat.
#[derive(Debug)]
pub struct DqnAgent<A> {
    config: DqnConfig,
    selector: ActionSelector,
    learner: Learner<A>,
    episode: EpisodeController,
    last_report: Option<TrainingReport>,
    episodes: u64,
}

impl<A: ActionValueApproximator> DqnAgent<A> {
    /// Build an agent from two approximators of identical architecture.
    ///
    /// The target is overwritten with the online parameters.
    pub fn new(online: A, target: A, config: DqnConfig) -> Result<Self> {
        config.validate()?;
        let root = AgentRng::new(config.seed);
        let selector = ActionSelector::new(config.epsilon, root.for_context("explore"));
        let learner = Learner::new(
            online,
            target,
            config.learner_config(),
            root.for_context("replay"),
        )?;

        Ok(Self {
            config,
            selector,
            learner,
            episode: EpisodeController::new(),
            last_report: None,
            episodes: 0,
        })
    }

    /// Choose the card to play from `hand` onto `trick`.
    ///
    /// If an earlier decision of this game is pending, it is credited with
    /// a zero-reward transition towards the current observation first, which
    /// may trigger a training step. That credit stands even if selection
    /// then fails, and is never repeated.
    pub fn decide<L>(&mut self, hand: &[Card], trick: &[Card], rules: &L) -> Result<Card>
    where
        L: LegalityOracle + ?Sized,
    {
        let state = encode_state(hand, trick);

        if let Some(feedback) = self.episode.observe(state)? {
            if let Some(report) = self.learner.observe(feedback)? {
                self.last_report = Some(report);
            }
        }

        let selection = self
            .selector
            .select(hand, trick, rules, state, self.learner.online())?;

        self.episode.record(PendingDecision {
            state,
            action: encode_action(selection.card),
        })?;
        Ok(selection.card)
    }

    /// Credit the game outcome to the last decision and sync the target.
    ///
    /// Scores are logged only; the reward is 1 for a win and 0 otherwise.
    /// Returns the report of a training step if the terminal transition
    /// triggered one.
    pub fn report_result(
        &mut self,
        won: bool,
        own_score: u32,
        partner_score: Option<u32>,
    ) -> Result<Option<TrainingReport>> {
        let reward = outcome_reward(won);
        let terminal = self.episode.finish(reward)?;

        let report = self.learner.observe(terminal)?;
        if let Some(report) = &report {
            self.last_report = Some(report.clone());
        }
        self.learner.sync_target()?;
        self.episodes += 1;

        debug!(
            won,
            own_score,
            partner_score = ?partner_score,
            reward,
            episodes = self.episodes,
            "game result"
        );
        Ok(report)
    }

    /// Forget any pending decision and prepare for a new game.
    pub fn reset_episode(&mut self) {
        self.episode.reset();
    }

    /// Write the online parameters to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        Checkpoint::new(self.learner.online().parameters()?).save(path)?;
        debug!(path = %path.display(), "checkpoint saved");
        Ok(())
    }

    /// Load online parameters from `path` and align the target with them.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let checkpoint = Checkpoint::load(path)?;
        self.learner.load_online(&checkpoint.parameters)?;
        debug!(path = %path.display(), "checkpoint loaded");
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.episode.phase()
    }

    #[must_use]
    pub fn config(&self) -> &DqnConfig {
        &self.config
    }

    #[must_use]
    pub fn learner(&self) -> &Learner<A> {
        &self.learner
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.selector.epsilon()
    }

    /// Change the exploration rate, e.g. to 0 for evaluation games.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.selector.set_epsilon(epsilon)?;
        self.config.epsilon = self.selector.epsilon();
        Ok(())
    }

    /// Report of the most recent training step, if any has run.
    #[must_use]
    pub fn last_report(&self) -> Option<&TrainingReport> {
        self.last_report.as_ref()
    }

    /// Games whose result has been reported.
    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }
}
