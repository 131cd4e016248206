use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::cards::{standard_deck, DeckFactory};
use crate::game::{ActiveBuff, BattleEndReason, BattleState, Phase};
use crate::hand::{HandSumContext, SumRule};
use crate::player::{Action, CombatStats, Combatant};
use crate::policy::{DecisionView, EnemyPolicy, ThresholdPolicy};
use crate::registry::{BossConfig, BuffEffect, BuffId, BuffRegistry};
use crate::rng::{default_source, RandomSource};
use crate::rules::{self, ResolveContext, RoundOutcome, RoundResult, INITIAL_COMBO};

/// Cards dealt to each side at round start.
const OPENING_CARDS: usize = 2;

/// Everything a battle is composed from besides the random source.
#[derive(Debug, Clone, Default)]
pub struct BattleOptions {
    /// `None` fights an ordinary enemy with the player's default stats.
    pub boss: Option<BossConfig>,
    /// Buff table consulted when a boss hook grants a buff.
    pub buffs: BuffRegistry,
    pub player: CombatStats,
}

/// Drives one battle through its phases:
/// `RoundStart → PlayerTurn → EnemyTurn → RoundResolve → (RoundStart | BattleEnd)`.
///
/// Every transition checks the current phase first and does nothing when
/// called out of turn, so a presenter may call them from timer callbacks
/// without double-applying anything.
///
/// # Examples
///
/// ```
/// use thirteen_engine::engine::{BattleController, BattleOptions};
/// use thirteen_engine::game::Phase;
/// use thirteen_engine::player::Action;
/// use thirteen_engine::rng::Pcg32;
///
/// let mut battle = BattleController::new(Some(Box::new(Pcg32::new(7))), BattleOptions::default());
/// battle.start_battle();
/// battle.start_round();
/// battle.player_action(Action::Stand);
/// battle.enemy_turn();
/// if let Some(result) = battle.resolve_round() {
///     battle.apply_round_result(result);
/// }
/// assert_eq!(battle.state().round_index, 1);
/// assert!(matches!(battle.state().phase, Phase::RoundStart | Phase::BattleEnd));
/// ```
pub struct BattleController {
    state: BattleState,
    rng: Box<dyn RandomSource>,
    boss: Option<BossConfig>,
    buffs: BuffRegistry,
    policy: Arc<dyn EnemyPolicy>,
}

impl fmt::Debug for BattleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleController")
            .field("state", &self.state)
            .field("boss", &self.boss.as_ref().map(|b| b.id))
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl BattleController {
    /// Builds the battle and shuffles both decks. Without an explicit
    /// source an entropy-seeded PCG generator is used.
    pub fn new(rng: Option<Box<dyn RandomSource>>, options: BattleOptions) -> Self {
        let mut rng = rng.unwrap_or_else(|| default_source(None));
        let BattleOptions {
            boss,
            buffs,
            player,
        } = options;

        let enemy_stats = boss.as_ref().map_or(CombatStats::default(), |b| b.stats);
        let enemy_factory = boss
            .as_ref()
            .map_or(standard_deck as DeckFactory, |b| b.deck_factory);
        let policy: Arc<dyn EnemyPolicy> = boss
            .as_ref()
            .and_then(|b| b.policy.clone())
            .unwrap_or_else(|| Arc::new(ThresholdPolicy::new()));

        let mut player = Combatant::new(player, standard_deck);
        let mut enemy = Combatant::new(enemy_stats, enemy_factory);
        player.deck.shuffle(rng.as_mut());
        enemy.deck.shuffle(rng.as_mut());

        tracing::debug!(
            boss = ?boss.as_ref().map(|b| b.id),
            policy = policy.name(),
            "battle created"
        );

        Self {
            state: BattleState {
                player,
                enemy,
                phase: Phase::RoundStart,
                combo: INITIAL_COMBO,
                round_index: 0,
                end_reason: None,
                boss_id: boss.as_ref().map(|b| b.id),
                player_buffs: BTreeMap::new(),
                consumed_slots: BTreeSet::new(),
                debuff_granted_this_round: false,
            },
            rng,
            boss,
            buffs,
            policy,
        }
    }

    /// Read-only view of the battle.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn boss(&self) -> Option<&BossConfig> {
        self.boss.as_ref()
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Puts a fresh battle into `RoundStart`. No-op once rounds have been played.
    pub fn start_battle(&mut self) {
        if self.state.round_index != 0 || self.state.phase == Phase::BattleEnd {
            return;
        }
        self.state.phase = Phase::RoundStart;
    }

    /// Deals the opening hands. A PERFECT opening on either side skips
    /// straight to `RoundResolve`.
    pub fn start_round(&mut self) {
        if self.state.phase != Phase::RoundStart {
            return;
        }
        self.state.player.hand.reset();
        self.state.enemy.hand.reset();
        self.state.combo = INITIAL_COMBO;
        self.state.round_index += 1;
        self.state.consumed_slots.clear();

        for _ in 0..OPENING_CARDS {
            draw_into_hand(&mut self.state.player, self.rng.as_mut());
            draw_into_hand(&mut self.state.enemy, self.rng.as_mut());
        }

        let enemy_ctx = self.enemy_context();
        let opening_perfect =
            self.state.player.hand.is_perfect(None) || self.state.enemy.hand.is_perfect(enemy_ctx);
        let both_dealt = self.state.player.hand.len() == OPENING_CARDS
            && self.state.enemy.hand.len() == OPENING_CARDS;

        self.state.phase = if both_dealt && opening_perfect {
            Phase::RoundResolve
        } else {
            Phase::PlayerTurn
        };
        tracing::debug!(
            round = self.state.round_index,
            player_sum = self.state.player.hand.sum(None),
            enemy_sum = self.state.enemy.hand.sum(enemy_ctx),
            phase = ?self.state.phase,
            "round started"
        );
    }

    /// Applies the player's decision. HIT draws and hands over to the enemy
    /// on bust or PERFECT; STAND hands over immediately unless a forced-draw
    /// debuff turns it into a HIT.
    pub fn player_action(&mut self, action: Action) {
        if self.state.phase != Phase::PlayerTurn {
            return;
        }
        match action {
            Action::Hit => self.player_draw(),
            Action::Stand => {
                let sum = self.state.player.hand.sum(None);
                if self.forced_draw_threshold().is_some_and(|t| sum < t) {
                    tracing::debug!(sum, "stand refused by forced-draw debuff");
                    self.player_draw();
                    return;
                }
                let hook = self.boss.as_ref().and_then(|b| b.on_player_stand);
                if let Some(buff) = hook.and_then(|h| h(self.state.player.hand.cards())) {
                    self.grant_buff(buff);
                }
                self.state.phase = Phase::EnemyTurn;
            }
        }
    }

    /// Plays the enemy's whole turn. Skipped entirely if the player busted.
    pub fn enemy_turn(&mut self) {
        if self.state.phase != Phase::EnemyTurn {
            return;
        }
        if self.state.player.hand.is_bust(None) {
            self.state.phase = Phase::RoundResolve;
            return;
        }
        loop {
            if self.state.enemy.hand.is_perfect(self.enemy_context()) {
                break;
            }
            let view = DecisionView {
                player_hand: &self.state.player.hand,
                enemy_hand: &self.state.enemy.hand,
                enemy_deck: &self.state.enemy.deck,
                sum_rule: self.sum_rule(),
            };
            let action = self.policy.decide(&view, self.rng.as_mut());
            tracing::debug!(
                policy = self.policy.name(),
                enemy_sum = view.enemy_stand_sum(),
                ?action,
                "enemy decision"
            );
            if action == Action::Stand {
                break;
            }
            draw_into_hand(&mut self.state.enemy, self.rng.as_mut());
            let ctx = self.enemy_context();
            if self.state.enemy.hand.is_perfect(ctx) || self.state.enemy.hand.is_bust(ctx) {
                break;
            }
        }
        self.state.phase = Phase::RoundResolve;
    }

    /// Computes the round's result without touching HP, so a presenter can
    /// animate before [`apply_round_result`](Self::apply_round_result).
    pub fn resolve_round(&mut self) -> Option<RoundResult> {
        if self.state.phase != Phase::RoundResolve {
            return None;
        }
        let enemy_ctx = self.enemy_context();
        if enemy_ctx.is_some_and(|c| c.straw_as_one) {
            if let Some(slot) = self.state.enemy.hand.first_straw_slot() {
                self.state.consumed_slots.insert(slot);
            }
        }
        let context = enemy_ctx.map(|c| ResolveContext {
            enemy_straw_as_one: c.straw_as_one,
        });
        Some(rules::resolve_round(
            &self.state.player.hand,
            &self.state.enemy.hand,
            self.state.combo,
            self.state.player.stats(),
            self.state.enemy.stats(),
            context,
        ))
    }

    /// Commits a result: damage, card recovery, reshuffle, buff expiry, and
    /// the move to the next round or the end of the battle.
    pub fn apply_round_result(&mut self, result: RoundResult) {
        if self.state.phase != Phase::RoundResolve {
            return;
        }
        match result.outcome {
            RoundOutcome::PlayerWin => self.state.enemy.take_damage(result.damage_dealt),
            RoundOutcome::EnemyWin => self.state.player.take_damage(result.damage_dealt),
            RoundOutcome::Draw => {}
        }

        let player_cards = self.state.player.hand.take_cards();
        self.state.player.deck.return_cards(player_cards);

        let consumed = std::mem::take(&mut self.state.consumed_slots);
        let enemy_cards = self.state.enemy.hand.take_cards();
        let kept = enemy_cards
            .into_iter()
            .enumerate()
            .filter(|(slot, card)| !(consumed.contains(slot) && card.is_removed_on_use()))
            .map(|(_, card)| card);
        self.state.enemy.deck.return_cards(kept);
        if !consumed.is_empty() {
            tracing::debug!(removed = consumed.len(), "special cards removed from enemy deck");
        }

        self.state.player.deck.shuffle(self.rng.as_mut());
        self.state.enemy.deck.shuffle(self.rng.as_mut());
        self.state.combo = INITIAL_COMBO;
        self.state.expire_buffs();

        if self.state.player.is_defeated() || self.state.enemy.is_defeated() {
            let reason = if self.state.enemy.is_defeated() {
                BattleEndReason::PlayerWin
            } else {
                BattleEndReason::EnemyWin
            };
            self.end_battle(reason);
        } else {
            self.state.phase = Phase::RoundStart;
        }
        tracing::debug!(
            round = self.state.round_index,
            outcome = ?result.outcome,
            damage = result.damage_dealt,
            player_hp = self.state.player.hp(),
            enemy_hp = self.state.enemy.hp(),
            "round applied"
        );
    }

    pub fn is_battle_end(&self) -> bool {
        self.state.phase == Phase::BattleEnd
    }

    /// Ends the battle immediately as an enemy win.
    pub fn surrender(&mut self) {
        if self.state.phase == Phase::BattleEnd {
            return;
        }
        self.end_battle(BattleEndReason::EnemyWin);
    }

    /// Enemy total as shown to the player, with the boss's sum rule applied.
    pub fn enemy_display_sum(&self) -> u32 {
        self.state.enemy.hand.sum(self.enemy_context())
    }

    pub fn enemy_display_is_bust(&self) -> bool {
        self.state.enemy.hand.is_bust(self.enemy_context())
    }

    fn end_battle(&mut self, reason: BattleEndReason) {
        self.state.phase = Phase::BattleEnd;
        self.state.end_reason = Some(reason);
        tracing::info!(
            rounds = self.state.round_index,
            ?reason,
            player_hp = self.state.player.hp(),
            enemy_hp = self.state.enemy.hp(),
            "battle ended"
        );
    }

    fn sum_rule(&self) -> SumRule {
        self.boss.as_ref().map(|b| b.sum_rule).unwrap_or_default()
    }

    fn enemy_context(&self) -> Option<HandSumContext> {
        self.sum_rule().context_for(self.state.enemy.hand.cards())
    }

    fn player_draw(&mut self) {
        draw_into_hand(&mut self.state.player, self.rng.as_mut());
        let hand = &self.state.player.hand;
        if hand.is_bust(None) || hand.is_perfect(None) {
            self.state.phase = Phase::EnemyTurn;
        }
    }

    /// Highest stand threshold among active forced-draw buffs.
    fn forced_draw_threshold(&self) -> Option<u32> {
        self.state
            .player_buffs
            .iter()
            .filter(|(_, active)| active.stacks > 0)
            .filter_map(|(id, _)| self.buffs.get_buff(*id))
            .map(|cfg| match cfg.effect {
                BuffEffect::ForcedDraw { stand_threshold } => stand_threshold,
            })
            .max()
    }

    fn grant_buff(&mut self, id: BuffId) {
        let Some(cfg) = self.buffs.get_buff(id) else {
            tracing::debug!(buff = %id, "ignoring unregistered buff");
            return;
        };
        let entry = self.state.player_buffs.entry(id).or_insert(ActiveBuff {
            stacks: 0,
            duration: cfg.duration,
        });
        entry.stacks += 1;
        entry.duration = cfg.duration;
        self.state.debuff_granted_this_round = true;
        tracing::debug!(buff = %id, stacks = entry.stacks, "buff granted");
    }
}

/// Draws one card for `side`, rebuilding its deck if it ran dry.
fn draw_into_hand(side: &mut Combatant, rng: &mut dyn RandomSource) {
    if let Some(card) = side.deck.draw_or_replenish(rng) {
        side.hand.add(card);
    }
}
