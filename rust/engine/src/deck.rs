use crate::cards::{Card, DeckFactory};
use crate::rng::RandomSource;

/// Draw pile for one combatant. Draws pop from the end of the sequence.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    factory: DeckFactory,
}

impl Deck {
    /// Unshuffled deck built from the archetype's factory.
    pub fn new(factory: DeckFactory) -> Self {
        Self {
            cards: factory(),
            factory,
        }
    }

    /// Deck with an explicit card order. `factory` is still used when the
    /// deck has to be reconstituted.
    pub fn with_cards(cards: Vec<Card>, factory: DeckFactory) -> Self {
        Self { cards, factory }
    }

    /// Fisher-Yates over the current contents.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.next_int_inclusive(0, i as u32) as usize;
            self.cards.swap(i, j);
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws, rebuilding and shuffling a full deck of the same composition
    /// first if this one is exhausted.
    pub fn draw_or_replenish(&mut self, rng: &mut dyn RandomSource) -> Option<Card> {
        if self.cards.is_empty() {
            self.replenish(rng);
        }
        self.cards.pop()
    }

    pub fn replenish(&mut self, rng: &mut dyn RandomSource) {
        tracing::debug!(size = self.cards.len(), "deck exhausted, rebuilding");
        self.cards = (self.factory)();
        self.shuffle(rng);
    }

    pub fn return_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Read-only view of the cards still to be drawn, in draw-reverse order.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn factory(&self) -> DeckFactory {
        self.factory
    }
}
