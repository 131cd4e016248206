use thirteen_engine::cards::{Card, Rank};
use thirteen_engine::hand::{optimal_sum, Hand, HandSumContext, SumRule, PERFECT};

const RANKS: [Rank; 8] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Straw,
];

fn card(rank: Rank) -> Card {
    if rank == Rank::Straw {
        Card::straw()
    } else {
        Card::new(rank)
    }
}

fn hand(ranks: &[Rank]) -> Hand {
    Hand::from_cards(ranks.iter().map(|&r| card(r)).collect())
}

/// Tries every low/high assignment of every ace.
fn brute_force(cards: &[Card], straw_as_one: bool) -> u32 {
    let aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    let mut fixed = 0;
    let mut elevated = false;
    for c in cards {
        match c.rank {
            Rank::Ace => {}
            Rank::Straw => {
                if straw_as_one && !elevated {
                    fixed += 1;
                    elevated = true;
                }
            }
            r => fixed += r.value(),
        }
    }
    let totals: Vec<u32> = (0..1u32 << aces)
        .map(|mask| {
            let high = mask.count_ones();
            fixed + high * 7 + (aces as u32 - high)
        })
        .collect();
    match totals.iter().filter(|&&t| t <= PERFECT).max() {
        Some(&best) => best,
        None => *totals.iter().min().unwrap(),
    }
}

/// All multisets of `RANKS` of size `len`, in non-decreasing index order.
fn multisets(len: usize, from: usize, current: &mut Vec<Rank>, out: &mut Vec<Vec<Rank>>) {
    if current.len() == len {
        out.push(current.clone());
        return;
    }
    for i in from..RANKS.len() {
        current.push(RANKS[i]);
        multisets(len, i, current, out);
        current.pop();
    }
}

#[test]
fn optimal_sum_matches_exhaustive_search_up_to_six_cards() {
    let mut all = Vec::new();
    for len in 0..=6 {
        multisets(len, 0, &mut Vec::new(), &mut all);
    }
    assert!(all.len() > 5_000);
    for ranks in &all {
        let cards: Vec<Card> = ranks.iter().map(|&r| card(r)).collect();
        assert_eq!(
            optimal_sum(&cards, None),
            brute_force(&cards, false),
            "plain sum of {:?}",
            ranks
        );
        assert_eq!(
            optimal_sum(&cards, Some(HandSumContext::STRAW_AS_ONE)),
            brute_force(&cards, true),
            "straw-as-one sum of {:?}",
            ranks
        );
    }
}

#[test]
fn ace_picks_the_value_that_lands_on_thirteen() {
    assert_eq!(hand(&[Rank::Ace, Rank::Six]).sum(None), 13);
    assert!(hand(&[Rank::Ace, Rank::Six]).is_perfect(None));
    assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::Six]).sum(None), 8);
    assert_eq!(hand(&[Rank::Ace, Rank::Five, Rank::Four]).sum(None), 10);
}

#[test]
fn bust_reports_the_smallest_overshoot() {
    let h = hand(&[Rank::Six, Rank::Five, Rank::Four, Rank::Ace]);
    assert_eq!(h.sum(None), 16);
    assert!(h.is_bust(None));
    assert!(!h.is_perfect(None));
}

#[test]
fn empty_hand_is_zero() {
    let h = Hand::new();
    assert_eq!(h.sum(None), 0);
    assert!(!h.is_bust(None));
}

#[test]
fn only_the_first_straw_is_elevated() {
    let h = hand(&[Rank::Six, Rank::Six, Rank::Straw, Rank::Straw]);
    assert_eq!(h.sum(None), 12);
    assert_eq!(h.sum(Some(HandSumContext::STRAW_AS_ONE)), 13);
    assert_eq!(h.first_straw_slot(), Some(2));
}

#[test]
fn straw_rule_only_applies_at_twelve() {
    let rule = SumRule::StrawAsOneAtTwelve;
    let at_twelve = hand(&[Rank::Seven, Rank::Five, Rank::Straw]);
    assert_eq!(
        rule.context_for(at_twelve.cards()),
        Some(HandSumContext::STRAW_AS_ONE)
    );
    let at_eleven = hand(&[Rank::Six, Rank::Five, Rank::Straw]);
    assert_eq!(rule.context_for(at_eleven.cards()), None);
    let no_straw = hand(&[Rank::Seven, Rank::Five]);
    assert_eq!(rule.context_for(no_straw.cards()), None);
    assert_eq!(SumRule::Plain.context_for(at_twelve.cards()), None);
}
