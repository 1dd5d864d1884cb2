use std::fs;

use headsup_engine::game::GameState;
use headsup_engine::logger::{format_hand_id, HandLogger, HandRecord};
use headsup_engine::player::{PlayerAction as A, Seat};

fn folded_hand() -> GameState {
    let mut g = GameState::with_seed(21);
    g.start_new_hand().unwrap();
    g.submit_action(g.dealer(), A::Fold).unwrap();
    g
}

#[test]
fn no_record_while_hand_runs() {
    let mut g = GameState::with_seed(21);
    assert!(g.hand_record("x").is_none());
    g.start_new_hand().unwrap();
    assert!(g.hand_record("x").is_none());
}

#[test]
fn record_nets_to_zero() {
    let g = folded_hand();
    let rec = g.hand_record(format_hand_id("20250102", 1)).unwrap();
    assert_eq!(rec.hand_id, "20250102-000001");
    assert_eq!(rec.seed, Some(21));
    assert_eq!(rec.result.as_deref(), Some(Seat::Player.id()));
    assert_eq!(rec.net_result.values().sum::<i64>(), 0);
    assert_eq!(rec.net_result["p0"], 10);
    assert!(rec.showdown.is_none());
    assert_eq!(rec.actions.len(), 1);
}

#[test]
fn records_round_trip_through_json() {
    let g = folded_hand();
    let rec = g.hand_record("20250102-000007").unwrap();
    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn logger_writes_one_line_per_hand_with_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("hands.jsonl");
    let g = folded_hand();
    {
        let mut logger = HandLogger::create(&path).expect("create logger");
        let id = logger.next_id();
        logger.write(&g.hand_record(id).unwrap()).unwrap();
        let id = logger.next_id();
        logger.write(&g.hand_record(id).unwrap()).unwrap();
    }
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\r'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let rec: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert!(rec.hand_id.ends_with("-000002"));
    assert!(rec.ts.is_some());
}
