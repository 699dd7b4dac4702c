//! Player-facing event log.
//!
//! Append-only, human-readable entries for the presentation layer. Backed by
//! `im::Vector` so snapshots share structure with the live log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Display tone of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTone {
    Info,
    Positive,
    Negative,
    Event,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    /// The player the entry is about, if any.
    pub player: Option<PlayerId>,
    pub tone: LogTone,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vector<LogEntry>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries appended after the first `cursor` entries.
    ///
    /// The UI keeps a cursor and polls for what it has not shown yet.
    pub fn since(&self, cursor: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(turn: u32, tone: LogTone, message: &str) -> LogEntry {
        LogEntry {
            turn,
            player: Some(PlayerId::new(0)),
            tone,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_push_and_since() {
        let mut log = EventLog::new();
        log.push(entry(1, LogTone::Info, "a"));
        log.push(entry(1, LogTone::Positive, "b"));
        log.push(entry(2, LogTone::Negative, "c"));

        assert_eq!(log.len(), 3);
        let fresh: Vec<_> = log.since(1).map(|e| e.message.as_str()).collect();
        assert_eq!(fresh, vec!["b", "c"]);
        assert_eq!(log.last().unwrap().tone, LogTone::Negative);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut log = EventLog::new();
        log.push(entry(1, LogTone::Event, "oracle"));
        let snapshot = log.clone();
        log.push(entry(2, LogTone::Info, "next"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_tone_serialization() {
        assert_eq!(serde_json::to_string(&LogTone::Positive).unwrap(), "\"positive\"");
    }
}
