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

#[test]
fn watch_mode_plays_requested_hands() {
    let (code, out, err) = run(&[
        "headsup", "play", "--watch", "--hands", "4", "--seed", "13", "--difficulty", "easy",
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.starts_with("play: difficulty=easy seed=13 watch=true"));
    assert_eq!(out.matches("=== Hand ").count(), 4);
    assert!(out.contains("Hands played: 4"));
}

#[test]
fn watch_mode_is_reproducible() {
    let args = [
        "headsup", "play", "--watch", "--hands", "6", "--seed", "21", "--difficulty", "hard",
    ];
    let strip_times = |s: String| -> Vec<String> {
        s.lines()
            .filter(|l| !l.trim_start().starts_with('['))
            .map(str::to_string)
            .collect()
    };
    let (_, first, _) = run(&args);
    let (_, second, _) = run(&args);
    assert_eq!(strip_times(first), strip_times(second));
}

#[test]
fn stacks_always_total_the_starting_chips() {
    let (code, out, _) = run(&["headsup", "play", "--watch", "--hands", "20", "--seed", "3"]);
    assert_eq!(code, 0);
    let total: u32 = out
        .lines()
        .filter_map(|l| l.strip_suffix(" chips"))
        .filter_map(|l| l.rsplit(": ").next())
        .map(|n| n.parse::<u32>().unwrap())
        .sum();
    assert_eq!(total, 2000);
}
