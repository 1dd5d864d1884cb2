//! Command-line surface of the `headsup` binary.

use clap::{Parser, Subcommand, ValueEnum};
use headsup_ai::Difficulty;

#[derive(Parser, Debug)]
#[command(
    name = "headsup",
    version,
    about = "Heads-up Texas Hold'em against a scripted opponent"
)]
pub struct HeadsupCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play against the AI from the terminal
    Play {
        /// Opponent difficulty (defaults to the configured one)
        #[arg(long, value_enum)]
        difficulty: Option<Level>,
        /// Stop after this many hands (default: until a stack is empty)
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Let a second AI take the player's seat
        #[arg(long)]
        watch: bool,
    },
    /// Simulate AI vs AI hands and write JSONL hand histories
    Sim {
        #[arg(long)]
        hands: u64,
        /// Output file; a `.zst` suffix compresses it
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Difficulty in the player seat (p0)
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        a: Level,
        /// Difficulty in the opponent seat (p1)
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        b: Level,
    },
    /// Compare two difficulties head-to-head
    Eval {
        #[arg(long, value_enum)]
        a: Level,
        #[arg(long, value_enum)]
        b: Level,
        #[arg(long, default_value_t = 100)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Summarize hand histories (file or directory)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Deal one hand and print the table as JSON
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Difficulty as accepted on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}
