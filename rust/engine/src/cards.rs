use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Face value of a card.
/// `Ace` is the flexible rank (1 or 7); `Straw` is the zero-value special rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Flexible rank, counts as 1 or 7
    Ace,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7 (boss decks only)
    Seven,
    /// Straw, counts as 0 unless elevated by a sum context
    Straw,
}

impl Rank {
    /// Fixed contribution of the rank. Aces report their low value here;
    /// the hand evaluator decides when an ace counts high.
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Straw => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Straw => "0",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "1" => Ok(Rank::Ace),
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "0" | "STRAW" => Ok(Rank::Straw),
            other => Err(EngineError::UnknownRank(other.to_string())),
        }
    }
}

/// Status flags a card can carry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Removed from its deck for the rest of the battle once its ability fires
    Delete,
}

/// Tag for cards with special behavior.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardEffect {
    /// May count as 1 instead of 0 under the boss's sum rule
    Straw,
}

/// A single card. Cards are fungible by rank; the optional status and
/// effect only matter for boss mechanics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<CardEffect>,
}

impl Card {
    pub const fn new(rank: Rank) -> Self {
        Self {
            rank,
            status: None,
            effect: None,
        }
    }

    /// A straw card: zero value, deleted after its ability is used.
    pub const fn straw() -> Self {
        Self {
            rank: Rank::Straw,
            status: Some(CardStatus::Delete),
            effect: Some(CardEffect::Straw),
        }
    }

    pub fn is_straw(&self) -> bool {
        self.rank == Rank::Straw || self.effect == Some(CardEffect::Straw)
    }

    pub fn is_removed_on_use(&self) -> bool {
        self.status == Some(CardStatus::Delete)
    }
}

impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        if rank == Rank::Straw {
            Card::straw()
        } else {
            Card::new(rank)
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)
    }
}

/// Builds a fresh, unshuffled card list for one combatant archetype.
pub type DeckFactory = fn() -> Vec<Card>;

pub const COPIES_PER_RANK: usize = 3;

pub fn player_ranks() -> [Rank; 6] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
    ]
}

pub fn scarecrow_ranks() -> [Rank; 6] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
    ]
}

/// Standard deck: A-6, three copies each (18 cards).
pub fn standard_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(18);
    for &r in &player_ranks() {
        for _ in 0..COPIES_PER_RANK {
            v.push(Card::new(r));
        }
    }
    v
}

/// Scarecrow deck: 2-7, three copies each, plus two straw cards (20 cards).
pub fn scarecrow_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(20);
    for &r in &scarecrow_ranks() {
        for _ in 0..COPIES_PER_RANK {
            v.push(Card::new(r));
        }
    }
    v.push(Card::straw());
    v.push(Card::straw());
    v
}

/// Parses a whitespace or comma separated list of rank labels.
pub fn parse_cards(input: &str) -> Result<Vec<Card>, EngineError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Rank>().map(Card::from))
        .collect()
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.rank.label())
        .collect::<Vec<_>>()
        .join(",")
}
