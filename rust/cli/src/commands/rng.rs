//! Random number generator inspection command.
//!
//! Prints floats and d6 rolls from the battle generator so a seed's
//! sequence can be checked by eye or diffed across builds.

use crate::error::CliError;
use std::io::Write;
use thirteen_engine::rng::{Pcg32, RandomSource};

const FLOAT_SAMPLES: usize = 5;
const D6_ROLLS: usize = 12;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = Pcg32::new(s);
    let floats: Vec<String> = (0..FLOAT_SAMPLES)
        .map(|_| format!("{:.6}", rng.next_f64()))
        .collect();
    let rolls: Vec<u32> = (0..D6_ROLLS).map(|_| rng.next_int_inclusive(1, 6)).collect();
    writeln!(out, "seed: {}", s)?;
    writeln!(out, "floats: [{}]", floats.join(", "))?;
    writeln!(out, "d6: {:?}", rolls)?;
    Ok(())
}
