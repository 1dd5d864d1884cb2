//! # headsup-engine: Heads-up Hold'em Rules Engine
//!
//! A deterministic Texas Hold'em engine for two seats: a human-facing
//! player and a scripted opponent. Provides the deck, hand evaluation,
//! betting validation and the hand state machine, with seeded RNG so
//! any session can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`game`] - Hand state machine: blinds, betting rounds, showdown
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Seats, player state, actions and chip movement
//! - [`pot`] - The single heads-up pot and split handling
//! - [`rules`] - Betting validation
//! - [`snapshot`] - Read-only table view for display and AI
//! - [`logger`] - Move log and HandRecord JSONL serialization
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_engine::cards::{Card, Rank, Suit};
//! use headsup_engine::hand::{evaluate_hand, Category};
//!
//! let cards = [
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//!     Card::new(Suit::Hearts, Rank::Queen),
//!     Card::new(Suit::Hearts, Rank::Jack),
//!     Card::new(Suit::Hearts, Rank::Ten),
//!     Card::new(Suit::Clubs, Rank::Two),
//!     Card::new(Suit::Diamonds, Rank::Three),
//! ];
//!
//! let eval = evaluate_hand(&cards).unwrap();
//! assert_eq!(eval.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use headsup_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.reset();
//! deck2.reset();
//! assert_eq!(deck1.deal_card().unwrap(), deck2.deal_card().unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod snapshot;
