use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Phase, Winner, WinningHand};
use crate::logger::MoveLogEntry;
use crate::player::{Player, Seat};

/// Read-only copy of the table handed to presentation layers and the AI.
///
/// Holds every card, hidden or not; callers that show the table to one seat
/// should go through [`Player::visible_hand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub pot: u32,
    pub last_pot: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    pub dealer: Seat,
    pub community: Vec<Card>,
    pub players: [Player; 2],
    pub to_act: Option<Seat>,
    pub winner: Option<Winner>,
    pub winning_hand: Option<WinningHand>,
    pub moves: Vec<MoveLogEntry>,
    pub hand_number: u32,
    pub game_over: bool,
}

impl TableSnapshot {
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn to_call(&self, seat: Seat) -> u32 {
        self.current_bet
            .saturating_sub(self.player(seat).current_bet())
    }

    pub fn is_turn_of(&self, seat: Seat) -> bool {
        self.to_act == Some(seat)
    }
}
