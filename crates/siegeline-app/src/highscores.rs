//! Persistent high-score table.
//!
//! Kept sorted by score, highest first, and capped at `HIGH_SCORE_CAPACITY`.
//! Stored as pretty-printed JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use siegeline_core::constants::HIGH_SCORE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Wave counter reached.
    pub wave: u32,
    /// Local date the game ended, `YYYY-MM-DD`.
    pub date: String,
}

impl HighScoreEntry {
    /// Entry stamped with today's date.
    pub fn new(name: impl Into<String>, score: u64, wave: u32) -> Self {
        Self {
            name: name.into(),
            score,
            wave,
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would make the table.
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.len() < HIGH_SCORE_CAPACITY
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Insert an entry below any existing entries with the same score.
    /// Returns its rank (0-based), or `None` if it did not make the table.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(rank, entry);
        self.entries.truncate(HIGH_SCORE_CAPACITY);
        Some(rank)
    }

    /// Load from `path`. A missing file is an empty table; the loaded list is
    /// re-sorted and capped in case it was edited by hand.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        let mut table: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid high-score file {}", path.display()))?;
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(HIGH_SCORE_CAPACITY);
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> HighScoreEntry {
        HighScoreEntry {
            name: name.into(),
            score,
            wave: 1,
            date: "2026-01-01".into(),
        }
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let mut table = HighScoreTable::new();
        assert_eq!(table.insert(entry("a", 100)), Some(0));
        assert_eq!(table.insert(entry("b", 300)), Some(0));
        assert_eq!(table.insert(entry("c", 200)), Some(1));
        assert_eq!(table.insert(entry("d", 200)), Some(2));

        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut table = HighScoreTable::new();
        for i in 0..HIGH_SCORE_CAPACITY as u64 {
            table.insert(entry("p", (i + 1) * 10));
        }
        assert_eq!(table.len(), HIGH_SCORE_CAPACITY);

        // Ties with the lowest score do not displace it.
        assert!(!table.qualifies(10));
        assert_eq!(table.insert(entry("late", 10)), None);
        assert_eq!(table.insert(entry("low", 5)), None);

        assert_eq!(table.insert(entry("top", 1_000)), Some(0));
        assert_eq!(table.len(), HIGH_SCORE_CAPACITY);
        assert_eq!(table.entries().last().unwrap().score, 20);
    }

    #[test]
    fn test_new_entry_is_dated() {
        let e = HighScoreEntry::new("me", 42, 3);
        assert_eq!(e.date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&e.date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "siegeline-scores-{}.json",
            std::process::id()
        ));
        let mut table = HighScoreTable::new();
        table.insert(entry("x", 50));
        table.insert(entry("y", 70));
        table.save(&path).unwrap();

        let loaded = HighScoreTable::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = std::env::temp_dir().join("siegeline-scores-never-written.json");
        assert!(HighScoreTable::load(&path).unwrap().is_empty());
    }
}
