use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Phase;
use crate::player::{PlayerAction, Seat};

/// One line of the human-readable move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    /// Player name, or `Dealer` for board events
    pub actor: String,
    pub action: String,
    pub phase: Phase,
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
}

impl MoveLogEntry {
    pub fn now(actor: impl Into<String>, action: impl Into<String>, phase: Phase) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            phase,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: Seat,
    /// The betting round when this action occurred
    pub phase: Phase,
    pub action: PlayerAction,
}

/// Information about the showdown when hands are compared.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats sharing the pot (two on a split)
    pub winners: Vec<Seat>,
    /// Winning hand name, e.g. "Flush"
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a finished hand, one JSONL line in a hand history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed the session deck was created with
    pub seed: Option<u64>,
    pub dealer: Seat,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards dealt before the hand ended
    pub board: Vec<Card>,
    /// `p0`, `p1` or `split`
    pub result: Option<String>,
    /// Timestamp when the hand was written (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// Chip delta per seat id; always sums to zero
    #[serde(default)]
    pub net_result: BTreeMap<String, i64>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Writes hand records as JSON lines.
pub struct HandLogger {
    writer: Option<BufWriter<Box<dyn Write>>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::with_writer(f))
    }

    /// Logs into any sink, e.g. a compressing encoder.
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            writer: Some(BufWriter::new(Box::new(writer))),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    /// Id generator only; `write` is a no-op.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.writer {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for HandLogger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_ids_are_sequential() {
        let mut logger = HandLogger::with_seq_for_test("20240101");
        assert_eq!(logger.next_id(), "20240101-000001");
        assert_eq!(logger.next_id(), "20240101-000002");
    }
}
