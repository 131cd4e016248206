use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Combatant;
use crate::registry::{BossId, BuffDuration, BuffId};

/// Battle phases. `BattleEnd` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    RoundStart,
    PlayerTurn,
    EnemyTurn,
    RoundResolve,
    BattleEnd,
}

/// Who won the battle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleEndReason {
    PlayerWin,
    EnemyWin,
}

impl fmt::Display for BattleEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEndReason::PlayerWin => f.write_str("PLAYER_WIN"),
            BattleEndReason::EnemyWin => f.write_str("ENEMY_WIN"),
        }
    }
}

/// A buff currently on the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub stacks: u32,
    pub duration: BuffDuration,
}

/// Aggregate root of one battle. Read it through
/// [`crate::engine::BattleController::state`]; it only changes through the
/// controller's transition methods.
#[derive(Debug, Clone)]
pub struct BattleState {
    pub player: Combatant,
    pub enemy: Combatant,
    pub phase: Phase,
    pub combo: u32,
    pub round_index: u32,
    pub end_reason: Option<BattleEndReason>,
    pub boss_id: Option<BossId>,
    pub player_buffs: BTreeMap<BuffId, ActiveBuff>,
    /// Enemy hand slots whose special card was used up this round.
    pub consumed_slots: BTreeSet<usize>,
    /// A debuff was granted during the current round.
    pub debuff_granted_this_round: bool,
}

impl BattleState {
    pub fn has_buff(&self, id: BuffId) -> bool {
        self.player_buffs.get(&id).is_some_and(|b| b.stacks > 0)
    }

    pub fn buff_stacks(&self, id: BuffId) -> u32 {
        self.player_buffs.get(&id).map_or(0, |b| b.stacks)
    }

    /// Round-end buff bookkeeping. A debuff granted this round keeps every
    /// buff alive into the next round.
    pub(crate) fn expire_buffs(&mut self) {
        if self.debuff_granted_this_round {
            self.debuff_granted_this_round = false;
            return;
        }
        self.player_buffs.retain(|_, buff| match &mut buff.duration {
            BuffDuration::EndOfRound => false,
            BuffDuration::Rounds(left) => {
                *left = left.saturating_sub(1);
                *left > 0
            }
        });
    }
}
