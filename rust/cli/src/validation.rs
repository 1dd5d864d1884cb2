//! Parsing of typed commands during interactive play.

use headsup_engine::player::PlayerAction;

/// Outcome of parsing one line of player input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(PlayerAction),
    /// `q` or `quit`
    Quit,
    /// Unusable input, with a message for the player
    Invalid(String),
}

/// Parses a player command (case-insensitive).
///
/// - `f`, `fold`
/// - `k`, `check`
/// - `c`, `call`
/// - `r N`, `raise N`: raise the table bet to a total of `N`
/// - `a`, `allin`, `all-in`
/// - `q`, `quit`
///
/// ```rust
/// # use headsup_cli::validation::{parse_player_action, ParseResult};
/// use headsup_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("Raise 60"), ParseResult::Action(PlayerAction::Raise(60)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match head {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Action(PlayerAction::Fold),
        "k" | "check" => ParseResult::Action(PlayerAction::Check),
        "c" | "call" => ParseResult::Action(PlayerAction::Call),
        "a" | "allin" | "all-in" => ParseResult::Action(PlayerAction::AllIn),
        "r" | "raise" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires a total (e.g., 'raise 60')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(total) if total > 0 => ParseResult::Action(PlayerAction::Raise(total)),
                Ok(_) => ParseResult::Invalid("Raise total must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <total>, allin, q",
            head
        )),
    }
}
