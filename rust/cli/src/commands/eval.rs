//! `eval`: pits two difficulties against each other and reports totals.

use crate::cli::Level;
use crate::config;
use crate::error::CliError;
use crate::session::{Tally, play_out_hand};
use crate::ui;
use headsup_ai::{Difficulty, create_ai};
use headsup_engine::game::GameState;
use std::io::Write;

/// Plays `hands` hands with `a` in the player seat and `b` in the opponent
/// seat, restarting the session whenever a stack runs dry, then prints a JSON
/// summary (wins, splits, net chips per side).
pub fn handle_eval_command(
    a: Level,
    b: Level,
    hands: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let (da, db) = (Difficulty::from(a), Difficulty::from(b));

    let mut game = GameState::new(cfg.table_config(), seed)?;
    let mut ais = [
        create_ai(da, seed.wrapping_add(1)),
        create_ai(db, seed.wrapping_add(2)),
    ];
    let mut tally = Tally::default();

    for _ in 0..hands {
        if game.is_game_over() {
            game.reset_session();
            tally.busts += 1;
        }
        play_out_hand(&mut game, &mut ais)?;
        if let Some(record) = game.hand_record(String::new()) {
            tally.record(&record);
        }
    }

    let summary = serde_json::json!({
        "hands": tally.hands,
        "seed": seed,
        "a": { "difficulty": da.as_str(), "wins": tally.wins[0], "net_chips": tally.net[0] },
        "b": { "difficulty": db.as_str(), "wins": tally.wins[1], "net_chips": tally.net[1] },
        "splits": tally.splits,
        "busts": tally.busts,
    });
    let json_output = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn eval_json(a: Level, b: Level, hands: u64, seed: u64) -> serde_json::Value {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_eval_command(a, b, hands, Some(seed), &mut out, &mut err).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    #[serial]
    fn test_eval_summary_is_consistent() {
        let json = eval_json(Level::Hard, Level::Easy, 50, 9);
        assert_eq!(json["hands"], 50);
        let wins_a = json["a"]["wins"].as_u64().unwrap();
        let wins_b = json["b"]["wins"].as_u64().unwrap();
        let splits = json["splits"].as_u64().unwrap();
        assert_eq!(wins_a + wins_b + splits, 50);
        assert_eq!(json["a"]["difficulty"], "hard");
        assert_eq!(json["b"]["difficulty"], "easy");
        let net_a = json["a"]["net_chips"].as_i64().unwrap();
        let net_b = json["b"]["net_chips"].as_i64().unwrap();
        assert_eq!(net_a + net_b, 0);
    }

    #[test]
    #[serial]
    fn test_eval_deterministic() {
        assert_eq!(
            eval_json(Level::Medium, Level::Medium, 20, 77),
            eval_json(Level::Medium, Level::Medium, 20, 77)
        );
    }

    #[test]
    #[serial]
    fn test_eval_rejects_zero_hands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_eval_command(Level::Easy, Level::Easy, 0, Some(1), &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(out.is_empty());
    }
}
