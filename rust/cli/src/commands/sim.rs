//! `sim`: AI vs AI hand generation.
//!
//! Every settled hand becomes one [`HandRecord`] line in the output file
//! (zstd-compressed when the path ends in `.zst`). When a stack empties the
//! session restarts at the configured stacks and the run continues.
//!
//! [`HandRecord`]: headsup_engine::logger::HandRecord

use crate::cli::Level;
use crate::config;
use crate::error::CliError;
use crate::io_utils::open_output;
use crate::session::{Tally, play_out_hand};
use crate::ui;
use headsup_ai::{Difficulty, create_ai};
use headsup_engine::game::GameState;
use headsup_engine::logger::HandLogger;
use std::io::Write;
use std::path::Path;

/// Seeds: the table uses `seed`, the two AIs `seed + 1` and `seed + 2`, so a
/// fixed seed reproduces the same hands.
pub fn handle_sim_command(
    hands: u64,
    output: Option<String>,
    seed: Option<u64>,
    a: Level,
    b: Level,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut logger = match output.as_deref() {
        Some(p) => match open_output(Path::new(p)) {
            Ok(w) => Some(HandLogger::with_writer(w)),
            Err(e) => {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
        },
        None => None,
    };

    let mut game = GameState::new(cfg.table_config(), seed)?;
    let mut ais = [
        create_ai(Difficulty::from(a), seed.wrapping_add(1)),
        create_ai(Difficulty::from(b), seed.wrapping_add(2)),
    ];
    let mut tally = Tally::default();

    for _ in 0..hands {
        if game.is_game_over() {
            tracing::info!(hand = game.hand_number(), "stack empty, restarting session");
            game.reset_session();
            tally.busts += 1;
        }
        play_out_hand(&mut game, &mut ais)?;

        let hand_id = match logger.as_mut() {
            Some(l) => l.next_id(),
            None => String::new(),
        };
        let Some(record) = game.hand_record(hand_id) else {
            continue;
        };
        tally.record(&record);
        if let Some(l) = logger.as_mut() {
            l.write(&record)?;
        }
    }

    if let Some(mut l) = logger {
        l.flush()?;
    }

    writeln!(out, "Simulated: {} hands", tally.hands)?;
    writeln!(
        out,
        "Wins: p0={} p1={} splits={} busts={}",
        tally.wins[0], tally.wins[1], tally.splits, tally.busts
    )?;
    if let Some(p) = output {
        writeln!(out, "Wrote {}", p)?;
    }
    Ok(())
}
