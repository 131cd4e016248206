//! Hand evaluation command.

use crate::error::CliError;
use std::io::Write;
use thirteen_engine::cards::{format_cards, parse_cards};
use thirteen_engine::hand::{Hand, HandSumContext};

/// Prints sum, bust and perfect for the given ranks.
pub fn handle_eval_command(
    cards: &[String],
    straw_as_one: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let parsed = parse_cards(&cards.join(" "))?;
    if parsed.is_empty() {
        return Err(CliError::InvalidInput("at least one card required".into()));
    }
    let hand = Hand::from_cards(parsed);
    let ctx = straw_as_one.then_some(HandSumContext::STRAW_AS_ONE);
    writeln!(out, "cards: {}", format_cards(hand.cards()))?;
    writeln!(out, "sum: {}", hand.sum(ctx))?;
    writeln!(out, "bust: {}", hand.is_bust(ctx))?;
    writeln!(out, "perfect: {}", hand.is_perfect(ctx))?;
    Ok(())
}
