use thirteen_ai::ProbabilisticPolicy;
use thirteen_engine::cards::{scarecrow_deck, Card, Rank};
use thirteen_engine::deck::Deck;
use thirteen_engine::hand::{Hand, SumRule};
use thirteen_engine::player::Action;
use thirteen_engine::policy::{DecisionView, EnemyPolicy};
use thirteen_engine::rng::Pcg32;

const BOSS_RANKS: [Rank; 7] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Straw,
];

/// Hands the scarecrow deck can deal: 2 to 4 cards, at most two straws.
fn boss_hands() -> Vec<Vec<Rank>> {
    fn go(len: usize, from: usize, cur: &mut Vec<Rank>, out: &mut Vec<Vec<Rank>>) {
        if cur.len() == len {
            let straws = cur.iter().filter(|&&r| r == Rank::Straw).count();
            let copies_ok = BOSS_RANKS[..6]
                .iter()
                .all(|r| cur.iter().filter(|&c| c == r).count() <= 3);
            if straws <= 2 && copies_ok {
                out.push(cur.clone());
            }
            return;
        }
        for i in from..BOSS_RANKS.len() {
            cur.push(BOSS_RANKS[i]);
            go(len, i, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    for len in 2..=4 {
        go(len, 0, &mut Vec::new(), &mut out);
    }
    out
}

fn to_hand(ranks: &[Rank]) -> Hand {
    Hand::from_cards(ranks.iter().map(|&r| Card::from(r)).collect())
}

#[test]
fn floors_hold_for_every_reachable_hand() {
    let policy = ProbabilisticPolicy::new();
    let players: Vec<Hand> = [
        vec![Rank::Two],
        vec![Rank::Four, Rank::Four],
        vec![Rank::Five, Rank::Six],
        vec![Rank::Six, Rank::Six],
        vec![Rank::Ace, Rank::Six],
        vec![Rank::Six, Rank::Six, Rank::Five],
    ]
    .iter()
    .map(|r| to_hand(r))
    .collect();
    let decks = [
        Deck::new(scarecrow_deck),
        Deck::with_cards(Vec::new(), scarecrow_deck),
        Deck::with_cards(vec![Card::new(Rank::Two)], scarecrow_deck),
        Deck::with_cards(vec![Card::straw()], scarecrow_deck),
    ];
    let mut rng = Pcg32::new(13);
    let mut checked = 0;

    for enemy in boss_hands().iter().map(|r| to_hand(r)) {
        for player in &players {
            for deck in &decks {
                let view = DecisionView {
                    player_hand: player,
                    enemy_hand: &enemy,
                    enemy_deck: deck,
                    sum_rule: SumRule::StrawAsOneAtTwelve,
                };
                let stand_sum = view.enemy_stand_sum();
                let action = policy.decide(&view, &mut rng);
                if stand_sum >= 9 {
                    assert_eq!(action, Action::Stand, "{:?} at {stand_sum}", enemy.cards());
                } else {
                    assert_eq!(action, Action::Hit, "{:?} at {stand_sum}", enemy.cards());
                }
                checked += 1;
            }
        }
    }
    assert!(checked > 1_000);
}
