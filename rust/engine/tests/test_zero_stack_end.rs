use headsup_engine::errors::GameError;
use headsup_engine::game::{GameState, Phase};
use headsup_engine::player::{PlayerAction as A, Seat};

fn shove_until_bust(g: &mut GameState) {
    for _ in 0..200 {
        if g.is_game_over() {
            return;
        }
        g.start_new_hand().unwrap();
        while let Some(seat) = g.to_act() {
            let action = if g.to_call(seat) > 0 { A::Call } else { A::AllIn };
            g.submit_action(seat, action).unwrap();
        }
    }
    panic!("nobody busted");
}

#[test]
fn zero_stack_prevents_new_hand() {
    let mut g = GameState::with_seed(1);
    shove_until_bust(&mut g);
    assert!(g.is_game_over());
    assert_eq!(g.phase(), Phase::Showdown);
    assert!(Seat::BOTH.iter().any(|&s| g.player(s).chips() == 0));
    assert_eq!(g.start_new_hand(), Err(GameError::StackEmpty));
    assert!(g.snapshot().game_over);
}

#[test]
fn reset_session_restores_stacks() {
    let mut g = GameState::with_seed(2);
    shove_until_bust(&mut g);
    g.reset_session();
    assert_eq!(g.phase(), Phase::Waiting);
    assert!(!g.is_game_over());
    assert_eq!(g.player(Seat::Player).chips(), 1000);
    assert_eq!(g.player(Seat::Opponent).chips(), 1000);
    assert!(g.moves().is_empty());
    g.start_new_hand().unwrap();
    assert_eq!(g.dealer(), Seat::Opponent);
}
