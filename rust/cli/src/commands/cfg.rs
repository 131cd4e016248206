//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of each value
//! (default, file, or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "player_hp": {
//!     "value": 30,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "configuration rejected");
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "player_hp": {
            "value": config.player_hp,
            "source": sources.player_hp,
        },
        "player_attack": {
            "value": config.player_attack,
            "source": sources.player_attack,
        },
        "player_defense": {
            "value": config.player_defense,
            "source": sources.player_defense,
        },
        "node": {
            "value": config.node,
            "source": sources.node,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
