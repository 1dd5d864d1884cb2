//! `deal`: starts a single hand and prints the table from the player's side.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_visible;
use headsup_engine::game::GameState;
use headsup_engine::player::Seat;
use std::io::Write;

/// Prints the snapshot as JSON with the opponent's hole cards masked as
/// `??`. The same seed always prints the same table.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut game = GameState::new(cfg.table_config(), seed)?;
    game.start_new_hand()?;
    let snap = game.snapshot();

    let mut view = serde_json::to_value(&snap).map_err(std::io::Error::other)?;
    let opponent = Seat::Opponent.index();
    if let Some(hand) = view
        .get_mut("players")
        .and_then(|p| p.get_mut(opponent))
        .and_then(|p| p.get_mut("hand"))
    {
        *hand = serde_json::json!(["??", "??"]);
    }
    for seat in Seat::BOTH {
        let shown: Vec<String> = snap
            .player(seat)
            .visible_hand()
            .iter()
            .map(|c| format_visible(c.as_ref()))
            .collect();
        view[seat.id()] = serde_json::json!(shown.join(" "));
    }
    view["seed"] = serde_json::json!(seed);

    let json_str = serde_json::to_string_pretty(&view).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
