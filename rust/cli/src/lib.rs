//! # headsup CLI Library
//!
//! Terminal driver for the heads-up Hold'em engine: interactive play against
//! the scripted opponent, AI vs AI simulation and evaluation, and hand
//! history statistics.
//!
//! The entry point is [`run`], which parses arguments and dispatches to a
//! subcommand, writing to the streams it is handed.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["headsup", "play", "--difficulty", "hard", "--hands", "10"];
//! let code = headsup_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `play`: play against the AI (or watch two AIs with `--watch`)
//! - `sim`: AI vs AI hands written as JSONL hand histories
//! - `eval`: head-to-head summary of two difficulties
//! - `stats`: aggregate JSONL hand histories
//! - `deal`: deal one hand and print the table as JSON
//! - `cfg`: show the resolved configuration

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

use cli::{Commands, HeadsupCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command, handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "eval", "stats", "deal", "cfg"];

/// Parses `args` and runs the chosen subcommand.
///
/// Returns the process exit code: [`exit_code::SUCCESS`],
/// [`exit_code::ERROR`] for bad arguments or a failed command, and
/// [`exit_code::INTERRUPTED`] when input ends in the middle of a hand.
///
/// ```
/// use std::io;
/// let args = vec!["headsup", "deal", "--seed", "42"];
/// let code = headsup_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HeadsupCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: headsup <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: headsup --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Play {
            difficulty,
            hands,
            seed,
            watch,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(difficulty, hands, seed, watch, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            hands,
            output,
            seed,
            a,
            b,
        } => handle_sim_command(hands, output, seed, a, b, out, err),
        Commands::Eval { a, b, hands, seed } => handle_eval_command(a, b, hands, seed, out, err),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
