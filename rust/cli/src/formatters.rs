//! Terminal rendering of cards, boards and actions.
//!
//! Suits use Unicode symbols where the terminal can show them and fall back
//! to letters otherwise. Hidden cards render as `??`.

use headsup_engine::cards::{Card, Suit};
use headsup_engine::player::PlayerAction;

/// Unix terminals are assumed to render Unicode; on Windows only modern hosts
/// (Windows Terminal, VS Code, anything setting `TERM_PROGRAM`) are trusted.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// `A♠` or `As`.
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.glyph(), format_suit(card.suit))
}

/// A card as seen by one seat: face-down cards stay hidden.
pub fn format_visible(card: Option<&Card>) -> String {
    match card {
        Some(c) => format_card(c),
        None => "??".to_string(),
    }
}

/// `[A♠ K♥ Q♦]`, or `[]` before the flop.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(total) => format!("raise to {}", total),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_engine::cards::Rank;

    #[test]
    fn test_format_card() {
        let formatted = format_card(&Card::new(Suit::Spades, Rank::Ace));
        assert!(formatted == "A♠" || formatted == "As");
        let ten = format_card(&Card::new(Suit::Hearts, Rank::Ten));
        assert!(ten.starts_with("10"));
    }

    #[test]
    fn test_format_visible_masks_hidden() {
        assert_eq!(format_visible(None), "??");
        let c = Card::new(Suit::Clubs, Rank::Two);
        assert_eq!(format_visible(Some(&c)), format_card(&c));
    }

    #[test]
    fn test_format_board() {
        assert_eq!(format_board(&[]), "[]");
        let board = [
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Hearts, Rank::King),
        ];
        let formatted = format_board(&board);
        assert!(formatted.starts_with("[A"));
        assert!(formatted.contains(" K"));
        assert!(formatted.ends_with(']'));
    }

    #[test]
    fn test_format_action() {
        assert_eq!(format_action(&PlayerAction::Fold), "fold");
        assert_eq!(format_action(&PlayerAction::Check), "check");
        assert_eq!(format_action(&PlayerAction::Call), "call");
        assert_eq!(format_action(&PlayerAction::Raise(80)), "raise to 80");
        assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
    }
}
