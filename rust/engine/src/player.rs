use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// One of the two seats at a heads-up table.
/// Seat 0 is the human-facing player, seat 1 the scripted opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Player, Seat::Opponent];

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    /// Short id used in hand records (`p0`, `p1`).
    pub fn id(self) -> &'static str {
        match self {
            Seat::Player => "p0",
            Seat::Opponent => "p1",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => f.write_str("player"),
            Seat::Opponent => f.write_str("opponent"),
        }
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when nothing is owed)
    Check,
    /// Match the table bet, or as much of it as the stack allows
    Call,
    /// Raise the table bet to the given total for this round
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seat's chips, hole cards and per-hand betting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    chips: u32,
    hand: Vec<Card>,
    /// Chips committed in the current betting round
    current_bet: u32,
    folded: bool,
    all_in: bool,
    last_action: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: Vec::with_capacity(2),
            current_bet: 0,
            folded: false,
            all_in: false,
            last_action: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn has_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    /// Neither folded nor all-in.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Hole cards with hidden ones replaced by `None`, as another seat sees them.
    pub fn visible_hand(&self) -> Vec<Option<Card>> {
        self.hand
            .iter()
            .map(|c| c.is_revealed().then_some(*c))
            .collect()
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        if self.hand.len() >= 2 {
            return Err(GameError::InvalidCardCount {
                count: self.hand.len() + 1,
            });
        }
        self.hand.push(c);
        Ok(())
    }

    pub fn reveal_hand(&mut self) {
        self.hand.iter_mut().for_each(Card::reveal);
    }

    /// Clears every per-hand field; chips carry over.
    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.last_action = None;
    }

    pub(crate) fn reset_round(&mut self) {
        self.current_bet = 0;
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn set_last_action(&mut self, label: String) {
        self.last_action = Some(label);
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Moves `amount` from the stack into this round's contribution.
    /// Reaching zero marks the player all-in.
    pub fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::NoChips);
        }
        self.chips -= amount;
        self.current_bet += amount;
        if self.chips == 0 && amount > 0 {
            self.all_in = true;
        }
        Ok(())
    }

    /// Takes back chips from this round's contribution (uncalled bets).
    pub(crate) fn refund(&mut self, amount: u32) {
        let amount = amount.min(self.current_bet);
        self.current_bet -= amount;
        self.chips += amount;
        if amount > 0 {
            self.all_in = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn commit_to_zero_is_all_in() {
        let mut p = Player::new("p", 100);
        p.commit(40).unwrap();
        assert_eq!(p.chips(), 60);
        assert_eq!(p.current_bet(), 40);
        assert!(!p.is_all_in());
        p.commit(60).unwrap();
        assert!(p.is_all_in());
        assert!(!p.can_act());
        assert_eq!(p.commit(1), Err(GameError::NoChips));
    }

    #[test]
    fn refund_returns_chips_and_clears_all_in() {
        let mut p = Player::new("p", 50);
        p.commit(50).unwrap();
        p.refund(20);
        assert_eq!(p.chips(), 20);
        assert_eq!(p.current_bet(), 30);
        assert!(!p.is_all_in());
    }

    #[test]
    fn hidden_cards_are_masked() {
        let mut p = Player::new("p", 10);
        p.give_card(Card::new(Suit::Spades, Rank::Ace)).unwrap();
        p.give_card(Card::new(Suit::Hearts, Rank::Two)).unwrap();
        assert_eq!(p.visible_hand(), vec![None, None]);
        p.reveal_hand();
        assert!(p.visible_hand().iter().all(Option::is_some));
        assert!(p.give_card(Card::new(Suit::Clubs, Rank::Two)).is_err());
    }

    #[test]
    fn seats_alternate() {
        assert_eq!(Seat::Player.other(), Seat::Opponent);
        assert_eq!(Seat::Opponent.other().index(), 0);
    }
}
