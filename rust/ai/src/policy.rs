//! Heuristic decision policy.
//!
//! Hand strength and pot odds feed a fixed priority list of rules; the
//! difficulty tier then gets a chance to override the result. All random
//! draws come from a seeded [`ChaCha20Rng`], so a seed replays a session.

use headsup_engine::cards::Card;
use headsup_engine::hand::{evaluate_hand, Category};
use headsup_engine::player::{PlayerAction, Seat};
use headsup_engine::snapshot::TableSnapshot;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{AIOpponent, Difficulty};

/// Chance that `Easy` throws away a playable decision.
const EASY_FOLD_CHANCE: f64 = 0.3;

/// Betting numbers the rules look at, taken from one seat's view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    /// Estimated strength in [0, 1]
    pub strength: f64,
    pub to_call: u32,
    pub pot: u32,
    pub stack: u32,
    pub table_bet: u32,
    pub min_raise: u32,
}

impl Situation {
    pub fn from_snapshot(snapshot: &TableSnapshot, seat: Seat) -> Self {
        let me = snapshot.player(seat);
        Self {
            strength: hand_strength(me.hand(), &snapshot.community),
            to_call: snapshot.to_call(seat),
            pot: snapshot.pot,
            stack: me.chips(),
            table_bet: snapshot.current_bet,
            min_raise: snapshot.min_raise,
        }
    }

    fn can_check(&self) -> bool {
        self.to_call == 0
    }

    // smallest total the engine accepts as a raise
    fn raise_floor(&self) -> u32 {
        self.min_raise.max(self.table_bet + 1)
    }

    fn legal_raise(&self, total: u32) -> Option<PlayerAction> {
        (total >= self.raise_floor() && total <= self.stack).then_some(PlayerAction::Raise(total))
    }

    // a zero-chip call is a check
    fn call_or_check(&self) -> PlayerAction {
        if self.can_check() {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }
}

/// Rough strength of a hand in [0, 1].
///
/// With five or more cards in total the made hand is evaluated and mapped
/// through a fixed category table. Before the flop only the hole cards
/// count: pairs land in [0.5, 0.8] and unpaired hands in [0, 0.4], both
/// scaled by the higher card.
///
/// ```
/// use headsup_ai::policy::hand_strength;
/// use headsup_engine::cards::{Card, Rank, Suit};
///
/// let aces = [Card::new(Suit::Hearts, Rank::Ace), Card::new(Suit::Spades, Rank::Ace)];
/// assert!((hand_strength(&aces, &[]) - 0.8).abs() < 1e-9);
/// ```
pub fn hand_strength(hole: &[Card], community: &[Card]) -> f64 {
    if hole.len() + community.len() >= 5 {
        let mut cards = hole.to_vec();
        cards.extend_from_slice(community);
        if let Ok(eval) = evaluate_hand(&cards) {
            return category_strength(eval.category);
        }
    }
    match hole {
        [a, b] => {
            let high = f64::from(a.value().max(b.value()));
            if a.value() == b.value() {
                0.5 + high / 14.0 * 0.3
            } else {
                high / 14.0 * 0.4
            }
        }
        _ => 0.0,
    }
}

pub fn category_strength(category: Category) -> f64 {
    match category {
        Category::RoyalFlush => 1.0,
        Category::StraightFlush => 0.95,
        Category::FourOfAKind => 0.9,
        Category::FullHouse => 0.85,
        Category::Flush => 0.75,
        Category::Straight => 0.65,
        Category::ThreeOfAKind => 0.55,
        Category::TwoPair => 0.45,
        Category::OnePair => 0.35,
        Category::HighCard => 0.2,
    }
}

/// `pot / (pot + to_call)`, or 1.0 when nothing is owed.
pub fn pot_odds(pot: u32, to_call: u32) -> f64 {
    if to_call == 0 {
        return 1.0;
    }
    f64::from(pot) / (f64::from(pot) + f64::from(to_call))
}

/// Rule-based opponent with difficulty-tuned randomness.
#[derive(Debug, Clone)]
pub struct HeuristicAI {
    difficulty: Difficulty,
    rng: ChaCha20Rng,
    name: String,
}

impl HeuristicAI {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: ChaCha20Rng::seed_from_u64(seed),
            name: format!("HeuristicAI ({})", difficulty),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Base rules, first match wins.
    pub fn choose(&mut self, s: &Situation) -> PlayerAction {
        let odds = pot_odds(s.pot, s.to_call);

        // 1. value raise or bluff
        if (s.strength >= 0.8 || self.rng.random_bool(self.difficulty.bluff_frequency()))
            && s.stack > s.to_call.saturating_mul(2)
        {
            let fraction: f64 = self.rng.random_range(0.5..=1.0);
            let bump = (f64::from(s.pot) * fraction).floor() as u32;
            let total = (s.table_bet + bump).max(s.min_raise).min(s.stack);
            if let Some(raise) = s.legal_raise(total) {
                return raise;
            }
        }

        // 2. strong: call with fair odds
        if s.strength >= 0.6 {
            if s.to_call > 0 && odds > 0.3 && s.to_call <= s.stack {
                return PlayerAction::Call;
            }
            if s.can_check() {
                return PlayerAction::Check;
            }
        }

        // 3. medium: take free cards, call with good odds
        if s.strength >= 0.4 {
            if s.can_check() {
                return PlayerAction::Check;
            }
            if odds > 0.5 {
                return PlayerAction::Call;
            }
        }

        // 4.
        if s.strength >= 0.3 && s.can_check() {
            return PlayerAction::Check;
        }

        // 5. weak hand facing a real bet
        if s.strength < 0.3 && f64::from(s.to_call) > f64::from(s.pot) * 0.3 {
            return PlayerAction::Fold;
        }

        // 6. cheap enough to see another card
        if f64::from(s.to_call) <= f64::from(s.stack) * 0.1 {
            return s.call_or_check();
        }

        PlayerAction::Fold
    }

    /// Difficulty override applied after [`HeuristicAI::choose`].
    pub fn adjust(&mut self, action: PlayerAction, s: &Situation) -> PlayerAction {
        match self.difficulty {
            Difficulty::Easy => {
                if action != PlayerAction::Fold && self.rng.random_bool(EASY_FOLD_CHANCE) {
                    return PlayerAction::Fold;
                }
                action
            }
            Difficulty::Medium => action,
            Difficulty::Hard => {
                if action == PlayerAction::Call
                    && self.rng.random_bool(self.difficulty.aggressiveness())
                {
                    // commit twice the call
                    return s.legal_raise(s.table_bet + s.to_call).unwrap_or(action);
                }
                action
            }
        }
    }
}

impl AIOpponent for HeuristicAI {
    fn decide(&mut self, snapshot: &TableSnapshot, seat: Seat) -> PlayerAction {
        let situation = Situation::from_snapshot(snapshot, seat);
        let base = self.choose(&situation);
        let action = self.adjust(base, &situation);
        tracing::debug!(
            ai = %self.name,
            strength = situation.strength,
            pot_odds = pot_odds(situation.pot, situation.to_call),
            to_call = situation.to_call,
            ?base,
            ?action,
            "ai decision"
        );
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
