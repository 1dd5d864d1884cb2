//! `stats`: aggregates JSONL hand histories.
//!
//! Accepts a single `.jsonl` / `.jsonl.zst` file or a directory searched
//! recursively for them. Every record's `net_result` must sum to zero.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use headsup_engine::logger::HandRecord;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default)]
struct StatsState {
    hands: u64,
    p0: u64,
    p1: u64,
    splits: u64,
    net_p0: i64,
    net_p1: i64,
    /// Unterminated last line of a file, e.g. an interrupted writer
    skipped: u64,
    corrupted: u64,
    stats_ok: bool,
}

pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut state = StatsState {
        stats_ok: true,
        ..StatsState::default()
    };

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => consume_stats_content(&content, &mut state, err)?,
                        Err(_) => state.corrupted += 1,
                    }
                }
            }
        }
    } else {
        match read_text_auto(&input) {
            Ok(s) => consume_stats_content(&s, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.hands == 0 && (state.corrupted > 0 || state.skipped > 0) {
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let summary = serde_json::json!({
        "hands": state.hands,
        "winners": { "p0": state.p0, "p1": state.p1 },
        "splits": state.splits,
        "net": { "p0": state.net_p0, "p1": state.net_p1 },
    });
    let json_output = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_output)?;
    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

fn consume_stats_content(
    content: &str,
    state: &mut StatsState,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        let rec: HandRecord = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => {
                if i == lines.len() - 1 && !has_trailing_nl {
                    state.skipped += 1;
                } else {
                    state.corrupted += 1;
                }
                continue;
            }
        };

        let sum: i64 = rec.net_result.values().sum();
        if sum != 0 {
            state.stats_ok = false;
            ui::write_error(
                err,
                &format!("Chip conservation violated at hand {}", rec.hand_id),
            )?;
        }

        state.hands += 1;
        match rec.result.as_deref() {
            Some("p0") => state.p0 += 1,
            Some("p1") => state.p1 += 1,
            Some("split") => state.splits += 1,
            _ => {}
        }
        state.net_p0 += rec.net_result.get("p0").copied().unwrap_or(0);
        state.net_p1 += rec.net_result.get("p1").copied().unwrap_or(0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0_WIN: &str = r#"{"hand_id":"20250101-000001","seed":1,"dealer":"opponent","actions":[],"board":[],"result":"p0","ts":"2025-01-01T00:00:00Z","showdown":null,"net_result":{"p0":20,"p1":-20}}"#;
    const P1_WIN: &str = r#"{"hand_id":"20250101-000002","seed":1,"dealer":"player","actions":[],"board":[],"result":"p1","ts":"2025-01-01T00:00:01Z","showdown":null,"net_result":{"p0":-10,"p1":10}}"#;
    const SPLIT: &str = r#"{"hand_id":"20250101-000003","seed":1,"dealer":"opponent","actions":[],"board":[],"result":"split","ts":"2025-01-01T00:00:02Z","showdown":{"winners":["player","opponent"],"notes":"Straight"},"net_result":{"p0":0,"p1":0}}"#;

    fn run_on(content: &str) -> (Result<(), CliError>, serde_json::Value, String) {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp, content.as_bytes()).unwrap();
        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_stats_command(path, &mut out, &mut err);
        let json = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
        (res, json, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_stats_empty_file() {
        let (res, json, _) = run_on("");
        assert!(res.is_ok());
        assert_eq!(json["hands"], 0);
    }

    #[test]
    fn test_stats_totals() {
        let (res, json, err) = run_on(&format!("{}\n{}\n{}\n", P0_WIN, P1_WIN, SPLIT));
        assert!(res.is_ok(), "{}", err);
        assert_eq!(json["hands"], 3);
        assert_eq!(json["winners"]["p0"], 1);
        assert_eq!(json["winners"]["p1"], 1);
        assert_eq!(json["splits"], 1);
        assert_eq!(json["net"]["p0"], 10);
        assert_eq!(json["net"]["p1"], -10);
    }

    #[test]
    fn test_stats_chip_conservation_violation() {
        let broken = P0_WIN.replace("\"p1\":-20", "\"p1\":-5");
        let (res, _, err) = run_on(&format!("{}\n", broken));
        assert!(res.is_err());
        assert!(err.contains("Chip conservation violated at hand 20250101-000001"));
    }

    #[test]
    fn test_stats_corrupted_middle_line() {
        let (res, json, err) = run_on(&format!("{}\n{{invalid json}}\n{}\n", P0_WIN, P1_WIN));
        assert!(res.is_ok());
        assert_eq!(json["hands"], 2);
        assert!(err.contains("Skipped 1 corrupted record(s)"));
    }

    #[test]
    fn test_stats_incomplete_last_line() {
        let (res, json, err) = run_on(&format!("{}\n{{\"hand_id\":\"2025", P0_WIN));
        assert!(res.is_ok());
        assert_eq!(json["hands"], 1);
        assert!(err.contains("Discarded 1 incomplete final line(s)"));
    }

    #[test]
    fn test_stats_only_garbage_is_an_error() {
        let (res, _, _) = run_on("not json\n");
        assert!(res.is_err());
    }

    #[test]
    fn test_stats_nonexistent_file() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_stats_command("/nonexistent/file.jsonl".into(), &mut out, &mut err);
        assert!(res.is_err());
        assert!(String::from_utf8(err).unwrap().contains("Failed to read"));
    }

    #[test]
    fn test_stats_directory_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("one.jsonl"), format!("{}\n", P0_WIN)).unwrap();
        std::fs::write(nested.join("two.jsonl"), format!("{}\n", P1_WIN)).unwrap();
        std::fs::write(nested.join("ignored.txt"), "noise").unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_stats_command(dir.path().to_string_lossy().into_owned(), &mut out, &mut err)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["hands"], 2);
    }
}
