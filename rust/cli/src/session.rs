//! Driving hands between scripted opponents, shared by `play --watch`,
//! `sim` and `eval`.

use headsup_ai::AIOpponent;
use headsup_engine::errors::GameError;
use headsup_engine::game::GameState;
use headsup_engine::logger::HandRecord;
use headsup_engine::player::{PlayerAction, Seat};
use serde::Serialize;

/// Submits `proposed`, falling back to check, then call, then fold if the
/// engine rejects it. Returns the action that was accepted.
///
/// A rejected action leaves the game untouched, so the fallbacks see the same
/// table as the proposal did.
pub fn apply_with_fallback(
    game: &mut GameState,
    seat: Seat,
    proposed: PlayerAction,
) -> Result<PlayerAction, GameError> {
    let first_err = match game.submit_action(seat, proposed) {
        Ok(()) => return Ok(proposed),
        Err(e) => e,
    };
    tracing::debug!(%seat, ?proposed, error = %first_err, "falling back");
    for fallback in [PlayerAction::Check, PlayerAction::Call, PlayerAction::Fold] {
        if fallback != proposed && game.submit_action(seat, fallback).is_ok() {
            return Ok(fallback);
        }
    }
    Err(first_err)
}

/// Deals one hand and lets the seat's opponent act until it settles.
/// `ais` is indexed by [`Seat::index`].
pub fn play_out_hand(
    game: &mut GameState,
    ais: &mut [Box<dyn AIOpponent>; 2],
) -> Result<(), GameError> {
    game.start_new_hand()?;
    while let Some(seat) = game.to_act() {
        let snapshot = game.snapshot();
        let proposed = ais[seat.index()].decide(&snapshot, seat);
        apply_with_fallback(game, seat, proposed)?;
    }
    Ok(())
}

/// Running totals over settled hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub hands: u64,
    /// Hands won outright, by seat index
    pub wins: [u64; 2],
    pub splits: u64,
    /// Chip delta, by seat index
    pub net: [i64; 2],
    /// Times a stack went to zero
    pub busts: u64,
}

impl Tally {
    pub fn record(&mut self, record: &HandRecord) {
        self.hands += 1;
        match record.result.as_deref() {
            Some("p0") => self.wins[0] += 1,
            Some("p1") => self.wins[1] += 1,
            Some("split") => self.splits += 1,
            _ => {}
        }
        for seat in Seat::BOTH {
            if let Some(delta) = record.net_result.get(seat.id()) {
                self.net[seat.index()] += delta;
            }
        }
    }
}
