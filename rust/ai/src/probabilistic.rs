//! Enumeration-based enemy policy.
//!
//! Compares the chance of winning by standing now against the average
//! chance after one more draw, where the draw is uniform over the cards
//! left in the enemy deck.

use thirteen_engine::cards::Card;
use thirteen_engine::hand::{optimal_sum, PERFECT};
use thirteen_engine::player::Action;
use thirteen_engine::policy::{DecisionView, EnemyPolicy};
use thirteen_engine::rng::RandomSource;

pub const HIT_FLOOR: u32 = 8;
pub const STAND_SAFE_THRESHOLD: u32 = 9;
pub const TIE_TOLERANCE: f64 = 0.05;
pub const FAVOR_PROBABILITY: f64 = 0.7;

/// Tunables for [`ProbabilisticPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilisticConfig {
    /// At or below this stand total the policy always hits.
    pub hit_floor: u32,
    /// At or above this stand total the policy always stands.
    pub stand_safe_threshold: u32,
    /// Rate differences smaller than this count as a tie.
    pub tie_tolerance: f64,
    /// Chance of taking the favored action on a tie.
    pub favor_probability: f64,
}

impl Default for ProbabilisticConfig {
    fn default() -> Self {
        Self {
            hit_floor: HIT_FLOOR,
            stand_safe_threshold: STAND_SAFE_THRESHOLD,
            tie_tolerance: TIE_TOLERANCE,
            favor_probability: FAVOR_PROBABILITY,
        }
    }
}

/// Boss-grade policy. With the default floors every stand total is
/// covered by a floor, so the enumeration only runs when the floors are
/// configured apart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbabilisticPolicy {
    config: ProbabilisticConfig,
}

impl ProbabilisticPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProbabilisticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbabilisticConfig {
        &self.config
    }

    /// Average win rate over every possible next draw. An empty deck is
    /// evaluated as a fresh deck of the same composition.
    ///
    /// Each post-draw hand is scored the way the controller scores it, with
    /// the boss sum rule re-applied to the new cards.
    pub fn hit_win_rate(&self, view: &DecisionView<'_>) -> f64 {
        let player_sum = view.player_hand.sum(None);
        let fresh;
        let remaining: &[Card] = if view.enemy_deck.is_empty() {
            fresh = (view.enemy_deck.factory())();
            &fresh
        } else {
            view.enemy_deck.remaining_cards()
        };
        if remaining.is_empty() {
            return 0.0;
        }

        let mut cards = view.enemy_hand.cards().to_vec();
        let mut total = 0.0;
        for card in remaining {
            cards.push(*card);
            let context = view.sum_rule.context_for(&cards);
            total += draw_outcome(optimal_sum(&cards, context), player_sum);
            cards.pop();
        }
        total / remaining.len() as f64
    }
}

/// 1 if the enemy total is higher, 0 if lower, 0.5 on a tie.
pub fn compare_win_rate(enemy_sum: u32, player_sum: u32) -> f64 {
    if enemy_sum > player_sum {
        1.0
    } else if enemy_sum < player_sum {
        0.0
    } else {
        0.5
    }
}

fn draw_outcome(enemy_sum: u32, player_sum: u32) -> f64 {
    if enemy_sum > PERFECT {
        0.0
    } else if enemy_sum == PERFECT {
        if player_sum == PERFECT { 0.5 } else { 1.0 }
    } else {
        compare_win_rate(enemy_sum, player_sum)
    }
}

impl EnemyPolicy for ProbabilisticPolicy {
    fn decide(&self, view: &DecisionView<'_>, rng: &mut dyn RandomSource) -> Action {
        let cfg = &self.config;
        let stand_sum = view.enemy_stand_sum();
        if stand_sum >= cfg.stand_safe_threshold {
            return Action::Stand;
        }
        if stand_sum <= cfg.hit_floor {
            return Action::Hit;
        }

        let stand_rate = compare_win_rate(stand_sum, view.player_hand.sum(None));
        let hit_rate = self.hit_win_rate(view);
        let diff = hit_rate - stand_rate;
        let action = if diff.abs() < cfg.tie_tolerance {
            let prefer_hit = diff > 0.0 || (diff >= 0.0 && stand_rate < 0.5);
            let (favored, other) = if prefer_hit {
                (Action::Hit, Action::Stand)
            } else {
                (Action::Stand, Action::Hit)
            };
            if rng.next_f64() < cfg.favor_probability {
                favored
            } else {
                other
            }
        } else if hit_rate > stand_rate {
            Action::Hit
        } else {
            Action::Stand
        };
        tracing::debug!(stand_sum, hit_rate, stand_rate, ?action, "probabilistic decision");
        action
    }

    fn name(&self) -> &str {
        "ProbabilisticPolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirteen_engine::cards::{scarecrow_deck, Rank};
    use thirteen_engine::deck::Deck;
    use thirteen_engine::hand::{Hand, SumRule};

    /// Always yields the same float.
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::from(r)).collect())
    }

    fn deck(ranks: &[Rank]) -> Deck {
        Deck::with_cards(ranks.iter().map(|&r| Card::from(r)).collect(), scarecrow_deck)
    }

    /// Floors pushed out of the way so every total reaches the enumeration.
    fn open() -> ProbabilisticPolicy {
        ProbabilisticPolicy::with_config(ProbabilisticConfig {
            hit_floor: 0,
            stand_safe_threshold: PERFECT + 1,
            ..ProbabilisticConfig::default()
        })
    }

    fn view<'a>(player: &'a Hand, enemy: &'a Hand, deck: &'a Deck) -> DecisionView<'a> {
        DecisionView {
            player_hand: player,
            enemy_hand: enemy,
            enemy_deck: deck,
            sum_rule: SumRule::StrawAsOneAtTwelve,
        }
    }

    #[test]
    fn win_rate_comparison() {
        assert_eq!(compare_win_rate(10, 9), 1.0);
        assert_eq!(compare_win_rate(9, 10), 0.0);
        assert_eq!(compare_win_rate(9, 9), 0.5);
    }

    #[test]
    fn clear_advantage_decides_without_randomness() {
        let p = open();
        let player = hand(&[Rank::Six, Rank::Six]);
        let enemy = hand(&[Rank::Six, Rank::Six]);
        let mut rng = Fixed(0.99);

        // the only draw busts
        let d = deck(&[Rank::Two]);
        assert_eq!(p.hit_win_rate(&view(&player, &enemy, &d)), 0.0);
        assert_eq!(p.decide(&view(&player, &enemy, &d), &mut rng), Action::Stand);

        // the only draw is a straw: 12 plus straw counts as 13
        let d = deck(&[Rank::Straw]);
        assert_eq!(p.hit_win_rate(&view(&player, &enemy, &d)), 1.0);
        assert_eq!(p.decide(&view(&player, &enemy, &d), &mut rng), Action::Hit);
    }

    #[test]
    fn near_tie_favors_standing_with_probability() {
        let p = open();
        let player = hand(&[Rank::Six, Rank::Six]);
        let enemy = hand(&[Rank::Six, Rank::Six]);
        let d = deck(&[Rank::Straw, Rank::Two]);
        let v = view(&player, &enemy, &d);
        assert_eq!(p.hit_win_rate(&v), 0.5);
        assert_eq!(p.decide(&v, &mut Fixed(0.1)), Action::Stand);
        assert_eq!(p.decide(&v, &mut Fixed(0.9)), Action::Hit);
    }

    #[test]
    fn near_tie_favors_hitting_when_standing_loses() {
        let p = open();
        let player = hand(&[Rank::Six, Rank::Six]);
        let enemy = hand(&[Rank::Five, Rank::Five]);
        // 10 loses to 12 standing; half the draws reach 13
        let d = deck(&[Rank::Three, Rank::Four]);
        let v = view(&player, &enemy, &d);
        assert_eq!(p.hit_win_rate(&v), 0.5);
        // hit 0.5 vs stand 0.0 is no tie
        assert_eq!(p.decide(&v, &mut Fixed(0.9)), Action::Hit);

        let tie = ProbabilisticPolicy::with_config(ProbabilisticConfig {
            tie_tolerance: 1.0,
            ..*open().config()
        });
        assert_eq!(tie.decide(&v, &mut Fixed(0.1)), Action::Hit);
        assert_eq!(tie.decide(&v, &mut Fixed(0.9)), Action::Stand);
    }

    #[test]
    fn empty_deck_enumerates_a_fresh_one() {
        let p = open();
        let player = hand(&[Rank::Six, Rank::Six]);
        let enemy = hand(&[Rank::Six, Rank::Six]);
        let d = deck(&[]);
        // only the two straws out of twenty avoid busting
        let rate = p.hit_win_rate(&view(&player, &enemy, &d));
        assert!((rate - 0.1).abs() < 1e-12);
    }
}
