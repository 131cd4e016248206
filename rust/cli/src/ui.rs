//! UI helper functions for terminal output formatting.

use std::io::Write;

use thirteen_engine::cards::format_cards;
use thirteen_engine::hand::{Hand, PERFECT};
use thirteen_engine::rules::{RoundOutcome, RoundResult};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `A,6 (13 PERFECT)`
pub fn describe_hand(hand: &Hand, sum: u32) -> String {
    let tag = if sum > PERFECT {
        " BUST"
    } else if sum == PERFECT {
        " PERFECT"
    } else {
        ""
    };
    format!("{} ({}{})", format_cards(hand.cards()), sum, tag)
}

pub fn describe_result(result: &RoundResult) -> String {
    let who = match result.outcome {
        RoundOutcome::PlayerWin => "You win the round",
        RoundOutcome::EnemyWin => "Enemy wins the round",
        RoundOutcome::Draw => return "Draw".to_string(),
    };
    format!(
        "{}: combo x{}, {} damage",
        who, result.combo_applied, result.damage_dealt
    )
}
