//! Lookup tables for bosses, buffs and map nodes.
//!
//! Tables are plain values owned by whoever composes a battle session and
//! passed into the controller; nothing here is process-global.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckFactory};
use crate::errors::EngineError;
use crate::hand::SumRule;
use crate::player::CombatStats;
use crate::policy::EnemyPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BossId {
    Scarecrow,
}

impl fmt::Display for BossId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BossId::Scarecrow => f.write_str("SCARECROW"),
        }
    }
}

impl FromStr for BossId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCARECROW" => Ok(BossId::Scarecrow),
            other => Err(EngineError::UnknownBoss(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuffId {
    Lazy,
}

impl fmt::Display for BuffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuffId::Lazy => f.write_str("LAZY"),
        }
    }
}

impl FromStr for BuffId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LAZY" => Ok(BuffId::Lazy),
            other => Err(EngineError::UnknownBuff(other.to_string())),
        }
    }
}

/// How long a buff stays active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffDuration {
    /// Cleared when the round ends (survives the round it was granted in)
    EndOfRound,
    /// Counts down once per round end
    Rounds(u32),
}

impl BuffDuration {
    /// Maps the numeric convention: `-1` (or any non-positive value) is
    /// end-of-round, a positive value is a countdown.
    pub fn from_turns(turns: i32) -> Self {
        if turns > 0 {
            BuffDuration::Rounds(turns as u32)
        } else {
            BuffDuration::EndOfRound
        }
    }
}

/// What an active buff does to the holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffEffect {
    /// STAND below the threshold becomes a forced HIT.
    ForcedDraw { stand_threshold: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffConfig {
    pub id: BuffId,
    pub duration: BuffDuration,
    pub effect: BuffEffect,
}

/// Buff table keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BuffRegistry {
    buffs: HashMap<BuffId, BuffConfig>,
}

impl BuffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a buff.
    pub fn register_buff(&mut self, config: BuffConfig) {
        self.buffs.insert(config.id, config);
    }

    pub fn get_buff(&self, id: BuffId) -> Option<&BuffConfig> {
        self.buffs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}

/// Called with the player's final hand when they stand. May grant a buff.
pub type StandHook = fn(&[Card]) -> Option<BuffId>;

/// Static data for one boss.
#[derive(Debug, Clone)]
pub struct BossConfig {
    pub id: BossId,
    pub display_name: String,
    pub stats: CombatStats,
    pub deck_factory: DeckFactory,
    /// `None` falls back to the default threshold policy.
    pub policy: Option<Arc<dyn EnemyPolicy>>,
    pub sum_rule: SumRule,
    pub on_player_stand: Option<StandHook>,
}

impl BossConfig {
    pub fn new(id: BossId, stats: CombatStats, deck_factory: DeckFactory) -> Self {
        Self {
            id,
            display_name: id.to_string(),
            stats,
            deck_factory,
            policy: None,
            sum_rule: SumRule::Plain,
            on_player_stand: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn EnemyPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_sum_rule(mut self, rule: SumRule) -> Self {
        self.sum_rule = rule;
        self
    }

    pub fn with_stand_hook(mut self, hook: StandHook) -> Self {
        self.on_player_stand = Some(hook);
        self
    }
}

/// Boss table plus the map-node to boss mapping.
#[derive(Debug, Clone, Default)]
pub struct BossRegistry {
    bosses: HashMap<BossId, BossConfig>,
    nodes: HashMap<String, BossId>,
}

impl BossRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a boss.
    pub fn register_boss(&mut self, config: BossConfig) {
        self.bosses.insert(config.id, config);
    }

    pub fn get_boss(&self, id: BossId) -> Option<&BossConfig> {
        self.bosses.get(&id)
    }

    pub fn map_node(&mut self, node_id: impl Into<String>, boss: BossId) {
        self.nodes.insert(node_id.into(), boss);
    }

    pub fn boss_id_for_node(&self, node_id: &str) -> Option<BossId> {
        self.nodes.get(node_id).copied()
    }

    /// Resolves a node straight to its boss config. Unmapped nodes and
    /// unregistered bosses both yield `None` (an ordinary enemy).
    pub fn boss_for_node(&self, node_id: &str) -> Option<&BossConfig> {
        self.boss_id_for_node(node_id)
            .and_then(|id| self.get_boss(id))
    }
}
