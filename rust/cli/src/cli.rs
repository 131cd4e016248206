use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "thirteen",
    version,
    about = "Thirteen card battle CLI: draw toward 13, bust above it"
)]
pub struct ThirteenCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Auto-play battles and print one JSON line per round
    Sim {
        #[arg(long, default_value_t = 1)]
        battles: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Map node to fight on (e.g. boss_d1)
        #[arg(long)]
        node: Option<String>,
        #[arg(long, value_enum, default_value_t = RngKind::Pcg)]
        rng: RngKind,
    },
    /// Play a battle interactively
    Play {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        node: Option<String>,
    },
    /// Evaluate a hand, e.g. `eval A 6`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Count the first straw as 1 (boss rule)
        #[arg(long)]
        straw_as_one: bool,
    },
    /// Print samples from the seeded generator
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RngKind {
    /// Built-in PCG32
    Pcg,
    /// ChaCha20 from rand_chacha
    Chacha,
}

impl RngKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RngKind::Pcg => "pcg",
            RngKind::Chacha => "chacha",
        }
    }
}
