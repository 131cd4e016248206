//! Shipped bosses, buffs and map nodes.

use std::sync::Arc;

use thirteen_engine::cards::{scarecrow_deck, Card};
use thirteen_engine::engine::BattleOptions;
use thirteen_engine::errors::EngineError;
use thirteen_engine::hand::{optimal_sum, SumRule};
use thirteen_engine::player::CombatStats;
use thirteen_engine::registry::{
    BossConfig, BossId, BossRegistry, BuffConfig, BuffDuration, BuffEffect, BuffId, BuffRegistry,
};

use crate::probabilistic::ProbabilisticPolicy;

/// Map node guarded by the scarecrow.
pub const SCARECROW_NODE: &str = "boss_d1";

pub const SCARECROW_STATS: CombatStats = CombatStats {
    hp: 30,
    attack: 3,
    defense: 0,
};

/// Opening totals at or below this make the scarecrow hand out LAZY.
pub const LAZY_TRIGGER_SUM: u32 = 9;
/// Stands below this are refused while LAZY is active.
pub const LAZY_STAND_THRESHOLD: u32 = 11;

pub fn scarecrow() -> BossConfig {
    BossConfig::new(BossId::Scarecrow, SCARECROW_STATS, scarecrow_deck)
        .with_display_name("Scarecrow")
        .with_policy(Arc::new(ProbabilisticPolicy::new()))
        .with_sum_rule(SumRule::StrawAsOneAtTwelve)
        .with_stand_hook(scarecrow_stand_hook)
}

/// Standing on an untouched low opening earns LAZY.
pub fn scarecrow_stand_hook(cards: &[Card]) -> Option<BuffId> {
    if cards.len() == 2 && optimal_sum(cards, None) <= LAZY_TRIGGER_SUM {
        Some(BuffId::Lazy)
    } else {
        None
    }
}

pub fn lazy() -> BuffConfig {
    BuffConfig {
        id: BuffId::Lazy,
        duration: BuffDuration::EndOfRound,
        effect: BuffEffect::ForcedDraw {
            stand_threshold: LAZY_STAND_THRESHOLD,
        },
    }
}

/// Every shipped table, ready to compose battles from.
#[derive(Debug, Clone)]
pub struct Content {
    pub bosses: BossRegistry,
    pub buffs: BuffRegistry,
}

impl Content {
    /// Options for the battle on `node_id`. Unmapped nodes are ordinary
    /// fights against the default enemy.
    pub fn battle_options(&self, node_id: Option<&str>, player: CombatStats) -> BattleOptions {
        BattleOptions {
            boss: node_id.and_then(|n| self.bosses.boss_for_node(n)).cloned(),
            buffs: self.buffs.clone(),
            player,
        }
    }

    /// Like [`battle_options`](Self::battle_options) but rejects nodes with no boss.
    pub fn boss_battle(&self, node_id: &str, player: CombatStats) -> Result<BattleOptions, EngineError> {
        if self.bosses.boss_for_node(node_id).is_none() {
            return Err(EngineError::UnknownNode(node_id.to_string()));
        }
        Ok(self.battle_options(Some(node_id), player))
    }
}

pub fn default_content() -> Content {
    let mut bosses = BossRegistry::new();
    bosses.register_boss(scarecrow());
    bosses.map_node(SCARECROW_NODE, BossId::Scarecrow);

    let mut buffs = BuffRegistry::new();
    buffs.register_buff(lazy());

    Content { bosses, buffs }
}
