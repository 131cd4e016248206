use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Target total. A hand at exactly this sum is PERFECT, above it is BUST.
pub const PERFECT: u32 = 13;

const ACE_LOW: u32 = 1;
const ACE_HIGH: u32 = 7;

/// Per-evaluation modifier. Never stored on the hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSumContext {
    /// The first straw card counts as 1 instead of 0.
    pub straw_as_one: bool,
}

impl HandSumContext {
    pub const STRAW_AS_ONE: HandSumContext = HandSumContext { straw_as_one: true };
}

/// How a combatant's hand picks its evaluation context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SumRule {
    #[default]
    Plain,
    /// With a straw in hand and a plain sum of exactly 12, the first straw
    /// counts as 1.
    StrawAsOneAtTwelve,
}

impl SumRule {
    pub fn context_for<'a, I>(self, cards: I) -> Option<HandSumContext>
    where
        I: IntoIterator<Item = &'a Card>,
        I::IntoIter: Clone,
    {
        match self {
            SumRule::Plain => None,
            SumRule::StrawAsOneAtTwelve => {
                let cards = cards.into_iter();
                let has_straw = cards.clone().any(Card::is_straw);
                if has_straw && optimal_sum(cards, None) == PERFECT - 1 {
                    Some(HandSumContext::STRAW_AS_ONE)
                } else {
                    None
                }
            }
        }
    }
}

/// Best attainable total over every low/high choice for each ace.
///
/// Prefers the largest total at or under [`PERFECT`]; when every choice
/// busts, the smallest overshoot.
pub fn optimal_sum<'a, I>(cards: I, context: Option<HandSumContext>) -> u32
where
    I: IntoIterator<Item = &'a Card>,
{
    let straw_as_one = context.is_some_and(|c| c.straw_as_one);
    let mut fixed = 0u32;
    let mut aces = 0u32;
    let mut straw_elevated = false;
    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        } else if card.is_straw() {
            if straw_as_one && !straw_elevated {
                fixed += 1;
                straw_elevated = true;
            }
        } else {
            fixed += card.rank.value();
        }
    }

    // Only the number of high aces matters, so k+1 totals cover all 2^k masks.
    let mut best = fixed + aces * ACE_LOW;
    let mut best_score = score(best);
    for high in 1..=aces {
        let total = fixed + high * ACE_HIGH + (aces - high) * ACE_LOW;
        let s = score(total);
        if s > best_score {
            best_score = s;
            best = total;
        }
    }
    best
}

/// Totals at or under 13 score themselves; busts score their negative overshoot.
fn score(total: u32) -> i64 {
    if total <= PERFECT {
        i64::from(total)
    } else {
        i64::from(PERFECT) - i64::from(total)
    }
}

/// Cards held by one combatant during a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn sum(&self, context: Option<HandSumContext>) -> u32 {
        optimal_sum(&self.cards, context)
    }

    pub fn is_bust(&self, context: Option<HandSumContext>) -> bool {
        self.sum(context) > PERFECT
    }

    pub fn is_perfect(&self, context: Option<HandSumContext>) -> bool {
        self.sum(context) == PERFECT
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Hand slot of the first straw card, if any.
    pub fn first_straw_slot(&self) -> Option<usize> {
        self.cards.iter().position(Card::is_straw)
    }

    /// Empties the hand, handing back its cards in slot order.
    pub fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }
}
