use serde::{Deserialize, Serialize};

use crate::hand::{Hand, HandSumContext};

/// Combo every round starts from and every draw resets to.
pub const INITIAL_COMBO: u32 = 1;

/// Round outcome from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    PlayerWin,
    EnemyWin,
    Draw,
}

/// Damage breakdown for presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageCalculation {
    pub attacker_attack: u32,
    pub defender_defense: u32,
    pub base_damage: u32,
    pub combo: u32,
    pub final_damage: u32,
}

impl DamageCalculation {
    fn new(attacker_attack: u32, defender_defense: u32, combo: u32) -> Self {
        let base_damage = attacker_attack.saturating_sub(defender_defense);
        Self {
            attacker_attack,
            defender_defense,
            base_damage,
            combo,
            final_damage: base_damage.saturating_mul(combo),
        }
    }
}

/// Outcome of one round, computed once and applied once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub combo_applied: u32,
    pub damage_dealt: u32,
    pub player_bust: bool,
    pub enemy_bust: bool,
    pub player_perfect: bool,
    pub enemy_perfect: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_calculation: Option<DamageCalculation>,
}

/// Attack and defense of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
}

/// Round-level evaluation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveContext {
    /// The enemy's first straw card counts as 1.
    pub enemy_straw_as_one: bool,
}

/// Decides winner, combo and damage for two finished hands.
///
/// Pure: neither hand is mutated, so it is safe to call speculatively.
///
/// ```
/// use thirteen_engine::cards::{Card, Rank};
/// use thirteen_engine::hand::Hand;
/// use thirteen_engine::rules::{resolve_round, RoundOutcome, Stats};
///
/// let player = Hand::from_cards(vec![Card::new(Rank::Six), Card::new(Rank::Ace)]);
/// let enemy = Hand::from_cards(vec![Card::new(Rank::Four), Card::new(Rank::Five)]);
/// let result = resolve_round(
///     &player,
///     &enemy,
///     1,
///     Stats { attack: 5, defense: 2 },
///     Stats { attack: 3, defense: 0 },
///     None,
/// );
/// assert_eq!(result.outcome, RoundOutcome::PlayerWin);
/// assert_eq!(result.combo_applied, 2);
/// assert_eq!(result.damage_dealt, 10);
/// ```
pub fn resolve_round(
    player_hand: &Hand,
    enemy_hand: &Hand,
    current_combo: u32,
    player: Stats,
    enemy: Stats,
    context: Option<ResolveContext>,
) -> RoundResult {
    let enemy_ctx = context
        .filter(|c| c.enemy_straw_as_one)
        .map(|_| HandSumContext::STRAW_AS_ONE);
    let current_combo = current_combo.max(INITIAL_COMBO);

    let player_sum = player_hand.sum(None);
    let enemy_sum = enemy_hand.sum(enemy_ctx);
    let player_bust = player_hand.is_bust(None);
    let enemy_bust = enemy_hand.is_bust(enemy_ctx);
    let player_perfect = player_hand.is_perfect(None);
    let enemy_perfect = enemy_hand.is_perfect(enemy_ctx);

    let draw = RoundResult {
        outcome: RoundOutcome::Draw,
        combo_applied: INITIAL_COMBO,
        damage_dealt: 0,
        player_bust,
        enemy_bust,
        player_perfect,
        enemy_perfect,
        damage_calculation: None,
    };
    let win = |outcome: RoundOutcome, combo: u32| {
        let (attacker, defender) = match outcome {
            RoundOutcome::EnemyWin => (enemy, player),
            _ => (player, enemy),
        };
        let calc = DamageCalculation::new(attacker.attack, defender.defense, combo);
        RoundResult {
            outcome,
            combo_applied: combo,
            damage_dealt: calc.final_damage,
            damage_calculation: Some(calc),
            ..draw
        }
    };

    match (player_bust, enemy_bust) {
        (true, true) => draw,
        (true, false) => {
            // +1 for the opponent's bust, +1 more for a perfect hand
            let combo = current_combo
                .saturating_add(u32::from(enemy_perfect))
                .saturating_add(1);
            win(RoundOutcome::EnemyWin, combo)
        }
        (false, true) => {
            let combo = current_combo
                .saturating_add(u32::from(player_perfect))
                .saturating_add(1);
            win(RoundOutcome::PlayerWin, combo)
        }
        (false, false) => {
            if player_sum > enemy_sum {
                win(
                    RoundOutcome::PlayerWin,
                    current_combo.saturating_add(u32::from(player_perfect)),
                )
            } else if enemy_sum > player_sum {
                win(
                    RoundOutcome::EnemyWin,
                    current_combo.saturating_add(u32::from(enemy_perfect)),
                )
            } else {
                draw
            }
        }
    }
}
