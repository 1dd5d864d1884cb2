use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories in ranking order; the discriminant is the category rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Best five-card hand found among the input cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: Category,
    // tiebreak values ordered by priority, zero padded
    pub tiebreak: [u8; 5],
    /// The five cards making the hand, highest first
    pub cards: [Card; 5],
}

impl HandEvaluation {
    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

/// Orders two evaluations by category, then tiebreak key element-wise.
/// `Equal` means a true tie regardless of which physical cards were used.
pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

/// Evaluates the best five-card hand from 5 to 7 cards.
///
/// Every five-card subset is scored independently and the strongest is
/// kept; with seven cards that is 21 subsets.
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] when fewer than 5 or more than 7 cards
/// are given. The dealing protocol never produces that.
///
/// # Examples
///
/// ```
/// use headsup_engine::cards::{Card, Rank, Suit};
/// use headsup_engine::hand::{evaluate_hand, Category};
///
/// let cards = [
///     Card::new(Suit::Hearts, Rank::Ace),
///     Card::new(Suit::Clubs, Rank::Two),
///     Card::new(Suit::Spades, Rank::Three),
///     Card::new(Suit::Diamonds, Rank::Four),
///     Card::new(Suit::Hearts, Rank::Five),
/// ];
/// let best = evaluate_hand(&cards).unwrap();
/// assert_eq!(best.category, Category::Straight);
/// assert_eq!(best.tiebreak[0], 5);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandEvaluation, GameError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidCardCount { count: cards.len() });
    }

    let mut best: Option<HandEvaluation> = None;
    for combo in five_card_subsets(cards.len()) {
        let hand = combo.map(|i| cards[i]);
        let eval = evaluate_five(hand);
        let better = match &best {
            None => true,
            Some(current) => compare_hands(&eval, current).is_gt(),
        };
        if better {
            best = Some(eval);
        }
    }
    best.ok_or(GameError::InvalidCardCount { count: cards.len() })
}

/// Scores exactly five cards.
pub fn evaluate_five(mut cards: [Card; 5]) -> HandEvaluation {
    cards.sort_unstable_by(|a, b| b.value().cmp(&a.value()));
    let values = cards.map(|c| c.value());

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high(&values);

    if let (true, Some(high)) = (flush, straight_high) {
        let category = if values[0] == 14 && values[1] == 13 {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
        return HandEvaluation {
            category,
            tiebreak: [high, 0, 0, 0, 0],
            cards,
        };
    }

    let groups = group_by_rank(&values);
    let sizes: Vec<u8> = groups.iter().map(|&(_, n)| n).collect();
    let mut grouped = [0u8; 5];
    for (slot, &(v, _)) in grouped.iter_mut().zip(groups.iter()) {
        *slot = v;
    }

    let (category, tiebreak) = if sizes[0] == 4 {
        (Category::FourOfAKind, grouped)
    } else if sizes == [3, 2] {
        (Category::FullHouse, grouped)
    } else if flush {
        (Category::Flush, values)
    } else if let Some(high) = straight_high {
        (Category::Straight, [high, 0, 0, 0, 0])
    } else if sizes[0] == 3 {
        (Category::ThreeOfAKind, grouped)
    } else if sizes[0] == 2 && sizes[1] == 2 {
        (Category::TwoPair, grouped)
    } else if sizes[0] == 2 {
        (Category::OnePair, grouped)
    } else {
        (Category::HighCard, values)
    };

    HandEvaluation {
        category,
        tiebreak,
        cards,
    }
}

// values sorted descending; the wheel counts as five-high
fn straight_high(values: &[u8; 5]) -> Option<u8> {
    if values.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(values[0]);
    }
    if *values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// (value, count) pairs sorted by count then value, both descending.
fn group_by_rank(values: &[u8; 5]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &v in values {
        match groups.iter_mut().find(|(gv, _)| *gv == v) {
            Some((_, n)) => *n += 1,
            None => groups.push((v, 1)),
        }
    }
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

fn five_card_subsets(n: usize) -> Vec<[usize; 5]> {
    let mut out = Vec::with_capacity(21);
    let mut idx = [0, 1, 2, 3, 4];
    loop {
        out.push(idx);
        // advance the rightmost index that still has room
        let mut i = 5;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] < n - 5 + i {
                break;
            }
        }
        idx[i] += 1;
        for j in i + 1..5 {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
