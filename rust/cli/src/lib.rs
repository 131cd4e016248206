//! # Thirteen CLI Library
//!
//! Command-line driver for the thirteen card battle engine. It only calls
//! the battle controller and prints what happens; every rules decision
//! stays in the engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = thirteen_cli::run(["thirteen", "eval", "A", "6"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8_lossy(&out).contains("perfect: true"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Auto-play battles and stream JSONL round records
//! - `play`: Play a battle interactively
//! - `eval`: Evaluate a hand's optimal sum
//! - `rng`: Print samples from the seeded generator
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
mod config;
mod error;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, ThirteenCli};
use commands::{
    handle_cfg_command, handle_eval_command, handle_play_command, handle_rng_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "play", "eval", "rng", "cfg"];

/// Main entry point for the CLI application.
///
/// Interactive input for `play` is read from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`] with an explicit input stream for `play`.
///
/// ```
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("q\n");
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = thirteen_cli::run_with_input(
///     ["thirteen", "play", "--seed", "1"],
///     &mut input,
///     &mut out,
///     &mut err,
/// );
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ThirteenCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            battles,
            seed,
            node,
            rng,
        } => handle_sim_command(battles, seed, node, rng, out, err),
        Commands::Play { seed, node } => handle_play_command(seed, node, stdin, out, err),
        Commands::Eval {
            cards,
            straw_as_one,
        } => handle_eval_command(&cards, straw_as_one, out),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return 2;
            }
            2
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return 2;
        }
        return 0;
    }
    if writeln!(err, "{}", e).is_err()
        || writeln!(err).is_err()
        || writeln!(err, "Thirteen card battle CLI").is_err()
        || writeln!(err, "Usage: thirteen <command> [options]\n").is_err()
        || writeln!(err, "Commands:").is_err()
    {
        return 2;
    }
    for c in COMMANDS {
        if writeln!(err, "  {}", c).is_err() {
            return 2;
        }
    }
    if writeln!(err, "\nFor full help, run: thirteen --help").is_err() {
        return 2;
    }
    2
}
