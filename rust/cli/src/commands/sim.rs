//! # Sim Command
//!
//! Auto-plays battles with the player driven by the threshold policy and
//! streams one [`RoundRecord`] JSON line per round, followed by a summary
//! line per battle.

use std::io::Write;

use crate::cli::RngKind;
use crate::commands::battle_setup;
use crate::error::CliError;
use thirteen_engine::engine::BattleController;
use thirteen_engine::game::Phase;
use thirteen_engine::logger::{RoundLogger, RoundRecord};
use thirteen_engine::policy::ThresholdPolicy;
use thirteen_engine::rng::{Pcg32, RandomSource, RngSource};

/// Guard against a battle that never ends (zero damage on both sides).
const MAX_ROUNDS: u32 = 10_000;

pub fn handle_sim_command(
    battles: u32,
    seed: Option<u64>,
    node: Option<String>,
    rng: RngKind,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if battles == 0 {
        return Err(CliError::InvalidInput("battles must be >= 1".to_string()));
    }
    let (cfg, options) = battle_setup(node, err)?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let player = ThresholdPolicy::new();
    let mut logger = RoundLogger::new(out);

    for i in 0..battles {
        let battle_seed = base_seed.wrapping_add(u64::from(i));
        let source: Box<dyn RandomSource> = match rng {
            RngKind::Pcg => Box::new(Pcg32::new(battle_seed)),
            RngKind::Chacha => Box::new(RngSource::chacha(battle_seed)),
        };
        let battle_id = logger.next_id();
        let mut battle = BattleController::new(Some(source), options.clone());
        battle.start_battle();
        tracing::debug!(%battle_id, seed = battle_seed, rng = rng.as_str(), "sim battle");

        while !battle.is_battle_end() {
            if battle.state().round_index >= MAX_ROUNDS {
                return Err(CliError::Engine(format!(
                    "battle {} did not finish within {} rounds",
                    battle_id, MAX_ROUNDS
                )));
            }
            match battle.state().phase {
                Phase::RoundStart => battle.start_round(),
                Phase::PlayerTurn => {
                    let action = player.decide_for(&battle.state().player.hand, None);
                    battle.player_action(action);
                }
                Phase::EnemyTurn => battle.enemy_turn(),
                Phase::RoundResolve => {
                    let Some(result) = battle.resolve_round() else {
                        break;
                    };
                    let mut record = RoundRecord::capture(
                        battle_id.clone(),
                        Some(battle_seed),
                        battle.state(),
                        battle.enemy_display_sum(),
                        result,
                    );
                    battle.apply_round_result(result);
                    record.settle(battle.state());
                    logger.write(&record)?;
                }
                Phase::BattleEnd => break,
            }
        }

        let state = battle.state();
        let summary = serde_json::json!({
            "battle_id": battle_id,
            "seed": battle_seed,
            "rounds": state.round_index,
            "player_hp": state.player.hp(),
            "enemy_hp": state.enemy.hp(),
            "battle_end_reason": state.end_reason,
        });
        writeln!(logger.get_mut(), "{}", summary)?;
    }
    Ok(())
}
