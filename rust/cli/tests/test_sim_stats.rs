use headsup_engine::logger::HandRecord;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = headsup_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn sim(path: &str, hands: &str, seed: &str) {
    let (code, out, err) = run(&[
        "headsup", "sim", "--hands", hands, "--seed", seed, "--a", "hard", "--b", "easy",
        "--output", path,
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains(&format!("Simulated: {} hands", hands)));
}

fn stats(path: &str) -> serde_json::Value {
    let (code, out, err) = run(&["headsup", "stats", "--input", path]);
    assert_eq!(code, 0, "stderr: {}", err);
    serde_json::from_str(&out).unwrap()
}

#[test]
fn sim_output_feeds_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.jsonl");
    let p = path.to_str().unwrap();
    sim(p, "40", "5");

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 40);

    let expected_p0 = records.iter().filter(|r| r.result.as_deref() == Some("p0")).count();
    let expected_net: i64 = records.iter().map(|r| r.net_result["p0"]).sum();

    let json = stats(p);
    assert_eq!(json["hands"], 40);
    assert_eq!(json["winners"]["p0"].as_u64().unwrap() as usize, expected_p0);
    assert_eq!(json["net"]["p0"].as_i64().unwrap(), expected_net);
    assert_eq!(
        json["net"]["p0"].as_i64().unwrap() + json["net"]["p1"].as_i64().unwrap(),
        0
    );
}

#[test]
fn compressed_histories_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.jsonl.zst");
    let b = dir.path().join("deeper").join("b.jsonl");
    sim(a.to_str().unwrap(), "10", "1");
    sim(b.to_str().unwrap(), "15", "2");

    let json = stats(dir.path().to_str().unwrap());
    assert_eq!(json["hands"], 25);
}

#[test]
fn every_record_conserves_chips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.jsonl");
    sim(path.to_str().unwrap(), "300", "17");
    let text = std::fs::read_to_string(&path).unwrap();
    for line in text.lines() {
        let rec: HandRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec.net_result.values().sum::<i64>(), 0, "{}", rec.hand_id);
        assert!(matches!(rec.result.as_deref(), Some("p0" | "p1" | "split")));
        assert!(rec.board.len() <= 5);
    }
}

#[test]
fn tampered_record_fails_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    sim(path.to_str().unwrap(), "3", "8");
    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let mut rec: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    rec["net_result"]["p0"] = serde_json::json!(12345);
    lines[1] = rec.to_string();
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();

    let (code, _, err) = run(&["headsup", "stats", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(err.contains("Chip conservation violated"));
}
