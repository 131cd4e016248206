//! Command handler modules for the thirteen CLI.
//!
//! Each command lives in its own module and exposes a
//! `handle_COMMAND_command(...) -> Result<(), CliError>` function that
//! writes to injected output streams.

mod cfg;
mod eval;
mod play;
mod rng;
mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;

use std::io::Write;

use thirteen_ai::content::default_content;
use thirteen_engine::engine::BattleOptions;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Resolved config plus the battle options for the chosen node.
/// A node without a boss still fights, against an ordinary enemy.
pub(crate) fn battle_setup(
    node: Option<String>,
    err: &mut dyn Write,
) -> Result<(Config, BattleOptions), CliError> {
    let cfg = config::load_with_sources()?.config;
    let node = node.or_else(|| cfg.node.clone());
    let content = default_content();
    let options = content.battle_options(node.as_deref(), cfg.player_stats());
    if let Some(n) = node.as_deref() {
        if options.boss.is_none() {
            ui::display_warning(
                err,
                &format!("node {} has no boss; fighting an ordinary enemy", n),
            )?;
        }
    }
    Ok((cfg, options))
}
