//! Enemy decision policies.
//!
//! The controller asks an [`EnemyPolicy`] for every enemy draw decision.
//! [`ThresholdPolicy`] is the default for ordinary enemies; boss-grade
//! policies live in the `thirteen-ai` crate and plug in through
//! [`crate::registry::BossConfig`].

use std::fmt;

use crate::deck::Deck;
use crate::hand::{Hand, HandSumContext, SumRule};
use crate::player::Action;
use crate::rng::RandomSource;

/// What a policy may look at when deciding. All borrows are shared, so a
/// policy cannot mutate hands or decks.
#[derive(Debug, Clone, Copy)]
pub struct DecisionView<'a> {
    pub player_hand: &'a Hand,
    pub enemy_hand: &'a Hand,
    pub enemy_deck: &'a Deck,
    pub sum_rule: SumRule,
}

impl DecisionView<'_> {
    /// Context the enemy's current hand is evaluated under.
    pub fn enemy_context(&self) -> Option<HandSumContext> {
        self.sum_rule.context_for(self.enemy_hand.cards())
    }

    /// Enemy total if it stood now.
    pub fn enemy_stand_sum(&self) -> u32 {
        self.enemy_hand.sum(self.enemy_context())
    }
}

/// Strategy that chooses HIT or STAND for the enemy.
///
/// # Example Implementation
///
/// ```rust
/// use thirteen_engine::player::Action;
/// use thirteen_engine::policy::{DecisionView, EnemyPolicy};
/// use thirteen_engine::rng::RandomSource;
///
/// #[derive(Debug)]
/// struct AlwaysStand;
///
/// impl EnemyPolicy for AlwaysStand {
///     fn decide(&self, _view: &DecisionView<'_>, _rng: &mut dyn RandomSource) -> Action {
///         Action::Stand
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysStand"
///     }
/// }
/// ```
pub trait EnemyPolicy: Send + Sync + fmt::Debug {
    fn decide(&self, view: &DecisionView<'_>, rng: &mut dyn RandomSource) -> Action;

    fn name(&self) -> &str;
}

pub const HIT_THRESHOLD: u32 = 10;

/// Hits while the hand is at or under a fixed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    pub hit_threshold: u32,
}

impl ThresholdPolicy {
    pub fn new() -> Self {
        Self {
            hit_threshold: HIT_THRESHOLD,
        }
    }

    /// The decision on a bare hand, also used to auto-drive the player.
    pub fn decide_for(&self, hand: &Hand, context: Option<HandSumContext>) -> Action {
        if hand.sum(context) <= self.hit_threshold {
            Action::Hit
        } else {
            Action::Stand
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyPolicy for ThresholdPolicy {
    fn decide(&self, view: &DecisionView<'_>, _rng: &mut dyn RandomSource) -> Action {
        self.decide_for(view.enemy_hand, view.enemy_context())
    }

    fn name(&self) -> &str {
        "ThresholdPolicy"
    }
}
