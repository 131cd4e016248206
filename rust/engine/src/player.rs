use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::DeckFactory;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::hand::Hand;
use crate::rules::Stats;

/// A turn decision, shared by the player and enemy policies.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Draw one more card
    Hit,
    /// Keep the current hand
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => f.write_str("HIT"),
            Action::Stand => f.write_str("STAND"),
        }
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hit" => Ok(Action::Hit),
            "s" | "stand" => Ok(Action::Stand),
            other => Err(EngineError::UnknownAction(other.to_string())),
        }
    }
}

pub const INITIAL_HP: u32 = 30;
pub const BASE_ATTACK: u32 = 5;
pub const BASE_DEFENSE: u32 = 2;

/// Starting numbers for one side of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            hp: INITIAL_HP,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
        }
    }
}

/// One side of a battle: vitals, stats, deck and current hand.
#[derive(Debug, Clone)]
pub struct Combatant {
    hp: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
    pub deck: Deck,
    pub hand: Hand,
}

impl Combatant {
    pub fn new(stats: CombatStats, factory: DeckFactory) -> Self {
        Self {
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            deck: Deck::new(factory),
            hand: Hand::new(),
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }
    pub fn attack(&self) -> u32 {
        self.attack
    }
    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn stats(&self) -> Stats {
        Stats {
            attack: self.attack,
            defense: self.defense,
        }
    }

    /// Subtracts damage, flooring at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}
