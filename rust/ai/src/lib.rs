//! # headsup-ai: Scripted Opponent for Heads-up Hold'em
//!
//! Decision policies for the non-human seat. A policy reads a
//! [`TableSnapshot`] and returns a [`PlayerAction`]; it never touches the
//! engine itself, so the driver decides what to do with the answer.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait every policy implements
//! - [`policy`] - Heuristic hand-strength policy with difficulty tiers
//! - [`thinking`] - Optional async "thinking" latency before a decision
//! - [`create_ai`] - Factory for a seeded opponent
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_ai::{create_ai, Difficulty};
//! use headsup_engine::game::GameState;
//!
//! let mut ai = create_ai(Difficulty::Medium, 42);
//! let mut game = GameState::with_seed(42);
//! game.start_new_hand().expect("deal");
//!
//! let seat = game.to_act().expect("someone to act");
//! let action = ai.decide(&game.snapshot(), seat);
//! println!("{} chose {:?}", ai.name(), action);
//! ```

use std::fmt;
use std::str::FromStr;

use headsup_engine::player::{PlayerAction, Seat};
use headsup_engine::snapshot::TableSnapshot;

pub mod policy;
pub mod thinking;

/// Interface for scripted opponents.
///
/// Implementations may keep their own RNG, hence `&mut self`; the same
/// snapshot and RNG state always give the same answer.
///
/// # Example Implementation
///
/// ```rust
/// use headsup_ai::AIOpponent;
/// use headsup_engine::player::{PlayerAction, Seat};
/// use headsup_engine::snapshot::TableSnapshot;
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn decide(&mut self, snapshot: &TableSnapshot, seat: Seat) -> PlayerAction {
///         if snapshot.to_call(seat) == 0 {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Call
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send {
    /// Action for `seat` given the current table.
    fn decide(&mut self, snapshot: &TableSnapshot, seat: Seat) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Tier fixed at construction; tunes aggression and bluffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Chance that `Hard` turns a call into a raise.
    pub fn aggressiveness(self) -> f64 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.4,
            Difficulty::Hard => 0.6,
        }
    }

    /// Chance of raising regardless of hand strength.
    pub fn bluff_frequency(self) -> f64 {
        match self {
            Difficulty::Easy => 0.05,
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty: {} (expected easy, medium or hard)",
                other
            )),
        }
    }
}

/// Builds a seeded heuristic opponent.
///
/// ```rust
/// use headsup_ai::{create_ai, Difficulty};
///
/// let ai = create_ai(Difficulty::Hard, 7);
/// assert_eq!(ai.name(), "HeuristicAI (hard)");
/// ```
pub fn create_ai(difficulty: Difficulty, seed: u64) -> Box<dyn AIOpponent> {
    Box::new(policy::HeuristicAI::new(difficulty, seed))
}
