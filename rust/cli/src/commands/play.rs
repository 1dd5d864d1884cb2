//! # Play Command
//!
//! Heads-up against the scripted opponent from the terminal.
//!
//! The human holds the player seat and types actions (`fold`, `check`,
//! `call`, `raise <total>`, `allin`, `q`). With `--watch` a second AI takes
//! that seat and the session runs unattended. Play continues hand after hand
//! until the `--hands` limit, a quit, or one stack is empty.

use crate::cli::Level;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_card, format_visible};
use crate::io_utils::read_stdin_line;
use crate::session::apply_with_fallback;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};
use headsup_ai::thinking::{ThinkingDelay, decide_with_delay};
use headsup_ai::{AIOpponent, Difficulty, create_ai};
use headsup_engine::game::{GameState, Winner, WinningHand};
use headsup_engine::player::{PlayerAction, Seat};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    HandLimit,
    Quit,
    GameOver,
}

pub fn handle_play_command(
    difficulty: Option<Level>,
    hands: Option<u32>,
    seed: Option<u64>,
    watch: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == Some(0) {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let difficulty = match difficulty {
        Some(level) => Difficulty::from(level),
        None => cfg
            .difficulty()
            .map_err(|e| CliError::Config(e.to_string()))?,
    };
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut game = GameState::new(cfg.table_config(), seed)?;
    let mut opponent = create_ai(difficulty, seed.wrapping_add(1));
    let mut stand_in = watch.then(|| create_ai(difficulty, seed.wrapping_add(2)));
    let mut table = Table {
        delay: ThinkingDelay::from_millis(cfg.think_ms),
        rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(3)),
        runtime: tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?,
    };

    writeln!(
        out,
        "play: difficulty={} seed={} watch={}",
        difficulty, seed, watch
    )?;
    writeln!(
        out,
        "Blinds: SB={} BB={}  Stacks: {}",
        cfg.small_blind, cfg.big_blind, cfg.starting_stack
    )?;

    let mut played = 0u32;
    let ending = loop {
        if game.is_game_over() {
            break Ending::GameOver;
        }
        if hands.is_some_and(|limit| played >= limit) {
            break Ending::HandLimit;
        }
        game.start_new_hand()?;
        let hand_ending = play_hand(
            &mut game,
            &mut opponent,
            stand_in.as_mut(),
            &mut table,
            out,
            err,
            stdin,
        )?;
        if hand_ending == Some(Ending::Quit) {
            break Ending::Quit;
        }
        played += 1;
        write_result(&game, out)?;
    };

    writeln!(out, "Hands played: {}", played)?;
    for seat in Seat::BOTH {
        let p = game.player(seat);
        writeln!(out, "{}: {} chips", p.name(), p.chips())?;
    }
    match ending {
        Ending::GameOver => {
            if let Some(winner) = Seat::BOTH.into_iter().find(|&s| game.player(s).chips() > 0) {
                writeln!(out, "Game over: {} wins the match", game.player(winner).name())?;
            }
        }
        Ending::Quit => writeln!(out, "Session ended by player.")?,
        Ending::HandLimit => {}
    }
    Ok(())
}

/// Opponent pacing; the runtime only drives the thinking delay.
struct Table {
    delay: ThinkingDelay,
    rng: ChaCha20Rng,
    runtime: tokio::runtime::Runtime,
}

impl Table {
    fn decide(&mut self, ai: &mut dyn AIOpponent, game: &GameState, seat: Seat) -> PlayerAction {
        let snapshot = game.snapshot();
        if self.delay.is_none() {
            return ai.decide(&snapshot, seat);
        }
        self.runtime.block_on(decide_with_delay(
            ai,
            &snapshot,
            seat,
            &self.delay,
            &mut self.rng,
        ))
    }
}

/// Runs one dealt hand to its end. `Some(Ending::Quit)` if the player quit.
fn play_hand(
    game: &mut GameState,
    opponent: &mut Box<dyn AIOpponent>,
    mut stand_in: Option<&mut Box<dyn AIOpponent>>,
    table: &mut Table,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<Ending>, CliError> {
    writeln!(
        out,
        "\n=== Hand {} (dealer: {}) ===",
        game.hand_number(),
        game.player(game.dealer()).name()
    )?;
    let hole: Vec<String> = game
        .player(Seat::Player)
        .visible_hand()
        .iter()
        .map(|c| format_visible(c.as_ref()))
        .collect();
    writeln!(out, "Your cards: {}", hole.join(" "))?;
    let mut shown = write_moves(game, 0, out)?;

    while let Some(seat) = game.to_act() {
        match (seat, stand_in.as_deref_mut()) {
            (Seat::Player, None) => {
                write_prompt(game, out)?;
                let Some(line) = read_stdin_line(stdin) else {
                    writeln!(out)?;
                    return Err(CliError::Interrupted("input closed mid-hand".to_string()));
                };
                match parse_player_action(&line) {
                    ParseResult::Quit => return Ok(Some(Ending::Quit)),
                    ParseResult::Invalid(msg) => {
                        ui::write_error(err, &msg)?;
                        continue;
                    }
                    ParseResult::Action(action) => {
                        if let Err(e) = game.submit_action(Seat::Player, action) {
                            ui::write_error(err, &format!("Invalid action: {}", e))?;
                            continue;
                        }
                    }
                }
            }
            (Seat::Player, Some(ai)) => {
                let proposed = table.decide(ai.as_mut(), game, seat);
                apply_with_fallback(game, seat, proposed)?;
            }
            (Seat::Opponent, _) => {
                let proposed = table.decide(opponent.as_mut(), game, seat);
                let taken = apply_with_fallback(game, seat, proposed)?;
                if taken != proposed {
                    tracing::warn!(
                        proposed = %format_action(&proposed),
                        taken = %format_action(&taken),
                        "opponent action replaced"
                    );
                }
            }
        }
        shown = write_moves(game, shown, out)?;
    }
    Ok(None)
}

/// Prints move-log lines from `from` on; returns the new count.
fn write_moves(game: &GameState, from: usize, out: &mut dyn Write) -> Result<usize, CliError> {
    let moves = game.moves();
    for m in moves.iter().skip(from) {
        writeln!(out, "  [{}] {}: {}", m.phase.name(), m.actor, m.action)?;
    }
    Ok(moves.len())
}

fn write_prompt(game: &GameState, out: &mut dyn Write) -> Result<(), CliError> {
    let me = game.player(Seat::Player);
    writeln!(
        out,
        "Board: {}  Pot: {}  Stack: {}",
        format_board(game.community()),
        game.pot(),
        me.chips()
    )?;
    let mut options = Vec::new();
    if let Some(legal) = game.legal_actions(Seat::Player) {
        options.push("fold".to_string());
        if legal.check {
            options.push("check".to_string());
        }
        if let Some(n) = legal.call {
            options.push(format!("call {}", n));
        }
        if let Some((lo, hi)) = legal.raise {
            options.push(format!("raise {}-{}", lo, hi));
        }
        if let Some(n) = legal.all_in {
            options.push(format!("allin {}", n));
        }
    }
    write!(out, "Your action ({}, q): ", options.join(" / "))?;
    out.flush()?;
    Ok(())
}

fn write_result(game: &GameState, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(WinningHand::Made(_)) = game.winning_hand() {
        let cards: Vec<String> = game.player(Seat::Opponent).hand().iter().map(format_card).collect();
        writeln!(out, "Board: {}", format_board(game.community()))?;
        writeln!(
            out,
            "{} shows: {}",
            game.player(Seat::Opponent).name(),
            cards.join(" ")
        )?;
    }
    let how = game.winning_hand().map(|w| w.name().to_string()).unwrap_or_default();
    match game.winner() {
        Some(Winner::Seat(s)) => writeln!(
            out,
            "{} wins {} ({})",
            game.player(s).name(),
            game.last_pot(),
            how
        )?,
        Some(Winner::Split) => writeln!(out, "Split pot of {} ({})", game.last_pot(), how)?,
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn play(
        input: &str,
        hands: Option<u32>,
        watch: bool,
    ) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let res = handle_play_command(
            Some(Level::Medium),
            hands,
            Some(42),
            watch,
            &mut out,
            &mut err,
            &mut stdin,
        );
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn test_quit_immediately() {
        let (res, out, _) = play("q\n", Some(3), false);
        assert!(res.is_ok());
        assert!(out.contains("=== Hand 1"));
        assert!(out.contains("Session ended by player."));
        assert!(!out.contains("Hands played: 3"));
    }

    #[test]
    #[serial]
    fn test_eof_mid_hand_is_interrupted() {
        // the player deals hand 2 and so must act
        let (res, _, _) = play("", Some(2), false);
        assert!(matches!(res, Err(CliError::Interrupted(_))));
    }

    #[test]
    #[serial]
    fn test_folding_every_hand_finishes_session() {
        let input = "fold\n".repeat(10);
        let (res, out, _) = play(&input, Some(3), false);
        assert!(res.is_ok(), "{:?}", res);
        assert!(out.contains("Hands played: 3"));
        assert!(out.contains("Posted small blind 10"));
    }

    #[test]
    #[serial]
    fn test_bad_input_is_reported_and_retried() {
        let input = format!("dance\nraise 5\n{}", "fold\n".repeat(10));
        let (res, out, err) = play(&input, Some(2), false);
        assert!(res.is_ok(), "{:?}", res);
        assert!(err.contains("Unrecognized action 'dance'"));
        assert!(err.contains("Invalid action: Invalid raise to 5"));
        assert!(out.contains("Hands played: 2"));
    }

    #[test]
    #[serial]
    fn test_watch_mode_needs_no_input() {
        let (res, out, _) = play("", Some(5), true);
        assert!(res.is_ok(), "{:?}", res);
        assert!(out.contains("Hands played: 5"));
        assert!(!out.contains("Your action"));
    }

    #[test]
    #[serial]
    fn test_watch_mode_plays_to_game_over() {
        let (res, out, _) = play("", None, true);
        assert!(res.is_ok(), "{:?}", res);
        assert!(out.contains("Game over:"));
        assert!(out.contains(": 0 chips"));
        assert!(out.contains(": 2000 chips"));
    }

    #[test]
    #[serial]
    fn test_zero_hands_rejected() {
        let (res, _, err) = play("", Some(0), false);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("hands must be >= 1"));
    }
}
