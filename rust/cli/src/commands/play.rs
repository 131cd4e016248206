//! # Play Command
//!
//! Interactive battle against an ordinary enemy or a map-node boss.
//!
//! - `h` / `hit` draws, `s` / `stand` ends the turn
//! - `q` / `quit` (or end of input) surrenders
//! - Round results are printed as they resolve

use std::io::{BufRead, Write};

use crate::commands::battle_setup;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;
use thirteen_engine::engine::BattleController;
use thirteen_engine::game::Phase;
use thirteen_engine::player::Action;
use thirteen_engine::registry::BuffId;
use thirteen_engine::rng::Pcg32;

/// What the player typed at the prompt.
enum Input {
    Act(Action),
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => Ok(Input::Quit),
        other => other
            .parse::<Action>()
            .map(Input::Act)
            .map_err(|e| e.to_string()),
    }
}

pub fn handle_play_command(
    seed: Option<u64>,
    node: Option<String>,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (cfg, options) = battle_setup(node, err)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut battle = BattleController::new(Some(Box::new(Pcg32::new(seed))), options);
    let opponent = battle
        .boss()
        .map_or_else(|| "Enemy".to_string(), |b| b.display_name.clone());

    writeln!(out, "play: seed={} vs={}", seed, opponent)?;

    battle.start_battle();

    while !battle.is_battle_end() {
        battle.start_round();
        {
            let state = battle.state();
            writeln!(out, "Round {}", state.round_index)?;
            writeln!(
                out,
                "HP: you {}/{} | {} {}/{}",
                state.player.hp(),
                state.player.max_hp(),
                opponent,
                state.enemy.hp(),
                state.enemy.max_hp()
            )?;
        }

        while battle.state().phase == Phase::PlayerTurn {
            let state = battle.state();
            writeln!(
                out,
                "Your hand: {}",
                ui::describe_hand(&state.player.hand, state.player.hand.sum(None))
            )?;
            if let Some(up) = state.enemy.hand.cards().first() {
                writeln!(out, "{} shows: {}", opponent, up)?;
            }
            if state.has_buff(BuffId::Lazy) {
                writeln!(out, "LAZY: standing below 11 draws a card instead")?;
            }
            write!(out, "Action [h]it / [s]tand / [q]uit: ")?;
            out.flush()?;

            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                battle.surrender();
                writeln!(out, "Input closed, surrendering.")?;
                break;
            };
            match parse_input(&line) {
                Ok(Input::Act(action)) => battle.player_action(action),
                Ok(Input::Quit) => {
                    battle.surrender();
                    writeln!(out, "You surrendered.")?;
                }
                Err(e) => ui::write_error(err, &e)?,
            }
        }
        if battle.is_battle_end() {
            break;
        }

        battle.enemy_turn();
        let Some(result) = battle.resolve_round() else {
            continue;
        };
        let state = battle.state();
        writeln!(
            out,
            "You: {}  {}: {}",
            ui::describe_hand(&state.player.hand, state.player.hand.sum(None)),
            opponent,
            ui::describe_hand(&state.enemy.hand, battle.enemy_display_sum())
        )?;
        writeln!(out, "{}", ui::describe_result(&result))?;
        battle.apply_round_result(result);
    }

    let state = battle.state();
    let reason = state
        .end_reason
        .map_or_else(|| "NONE".to_string(), |r| r.to_string());
    writeln!(out, "Battle over: {}", reason)?;
    writeln!(out, "Rounds played: {}", state.round_index)?;
    Ok(())
}
