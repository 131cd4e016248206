use std::collections::HashMap;

use thirteen_engine::cards::{scarecrow_deck, standard_deck, Card, CardEffect, CardStatus, Rank};
use thirteen_engine::deck::Deck;
use thirteen_engine::rng::Pcg32;

fn counts(cards: &[Card]) -> HashMap<Rank, usize> {
    let mut m = HashMap::new();
    for c in cards {
        *m.entry(c.rank).or_insert(0) += 1;
    }
    m
}

#[test]
fn deck_compositions() {
    let player = standard_deck();
    assert_eq!(player.len(), 18);
    let c = counts(&player);
    for rank in [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six] {
        assert_eq!(c[&rank], 3, "{rank:?}");
    }

    let boss = scarecrow_deck();
    assert_eq!(boss.len(), 20);
    let c = counts(&boss);
    assert_eq!(c[&Rank::Straw], 2);
    assert_eq!(c[&Rank::Seven], 3);
    assert!(!c.contains_key(&Rank::Ace));
    assert!(boss
        .iter()
        .filter(|c| c.is_straw())
        .all(|c| c.is_removed_on_use()));
}

#[test]
fn shuffle_preserves_the_multiset() {
    let mut rng = Pcg32::new(2024);
    let mut deck = Deck::new(scarecrow_deck);
    let before = counts(deck.remaining_cards());
    for _ in 0..50 {
        deck.shuffle(&mut rng);
        assert_eq!(counts(deck.remaining_cards()), before);
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new(standard_deck);
    let mut d2 = Deck::new(standard_deck);
    d1.shuffle(&mut Pcg32::new(12345));
    d2.shuffle(&mut Pcg32::new(12345));
    assert_eq!(
        d1.remaining_cards(),
        d2.remaining_cards(),
        "same seed must yield identical order"
    );
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new(standard_deck);
    let mut d2 = Deck::new(standard_deck);
    d1.shuffle(&mut Pcg32::new(1));
    d2.shuffle(&mut Pcg32::new(2));
    assert_ne!(
        d1.remaining_cards(),
        d2.remaining_cards(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn returned_cards_are_drawable_again() {
    let mut rng = Pcg32::new(5);
    let mut deck = Deck::new(standard_deck);
    deck.shuffle(&mut rng);
    let drawn: Vec<Card> = (0..5).filter_map(|_| deck.draw()).collect();
    assert_eq!(deck.len(), 13);
    deck.return_cards(drawn);
    assert_eq!(deck.len(), 18);
    assert_eq!(counts(deck.remaining_cards()), counts(&standard_deck()));
}

/// Eighteen distinguishable cards, so every starting slot can be traced.
fn tagged_cards() -> Vec<Card> {
    let ranks = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Straw,
    ];
    let mut cards = Vec::new();
    for status in [None, Some(CardStatus::Delete)] {
        for effect in [None, Some(CardEffect::Straw)] {
            for rank in ranks {
                cards.push(Card {
                    rank,
                    status,
                    effect,
                });
            }
        }
    }
    cards.truncate(18);
    cards
}

/// Every card should land in every position about equally often.
#[test]
fn positions_are_roughly_uniform() {
    const TRIALS: usize = 100_000;
    const SIZE: usize = 18;
    let start = tagged_cards();
    let index: HashMap<Card, usize> = start.iter().enumerate().map(|(i, c)| (*c, i)).collect();
    assert_eq!(index.len(), SIZE);

    let mut rng = Pcg32::new(77);
    let mut table = [[0usize; SIZE]; SIZE];
    for _ in 0..TRIALS {
        let mut deck = Deck::with_cards(start.clone(), standard_deck);
        deck.shuffle(&mut rng);
        for (pos, card) in deck.remaining_cards().iter().enumerate() {
            table[index[card]][pos] += 1;
        }
    }

    let expected = TRIALS as f64 / SIZE as f64;
    let mut total = 0.0;
    for (card, row) in table.iter().enumerate() {
        let chi_square: f64 = row
            .iter()
            .map(|&n| {
                let d = n as f64 - expected;
                d * d / expected
            })
            .sum();
        // 17 degrees of freedom; the 0.0001 critical value is about 45.6
        assert!(chi_square < 55.0, "card {card}: chi-square {chi_square}");
        total += chi_square;
    }
    // 289 degrees of freedom over the whole table
    assert!(total < 400.0, "table chi-square {total}");
}
