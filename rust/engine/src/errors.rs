use thiserror::Error;

use crate::player::Seat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid raise to {amount}: must be at least {minimum} and at most {maximum}")]
    InvalidRaise {
        amount: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("Cannot check facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("No chips left to commit")]
    NoChips,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("A player's stack is empty; the game is over")]
    StackEmpty,
    #[error("{seat} has folded or is all-in and cannot act")]
    PlayerCannotAct { seat: Seat },
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotPlayersTurn { expected: Seat, actual: Seat },
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Hand evaluation needs 5 to 7 cards, got {count}")]
    InvalidCardCount { count: usize },
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}
