//! High score leaderboard system
//!
//! Persisted as a plain text file, one entry per line:
//! `<name> <score> <level> <play_time_secs> <unix_timestamp>`.
//! Tracks the top 10 runs ordered by score, faster runs first on ties.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::LEADERBOARD_CAPACITY;
use crate::settings::sanitize_name;

/// Failure reading or writing the leaderboard file
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Single whitespace-free token
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Run length in whole seconds
    pub play_time_secs: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: i64,
}

impl LeaderboardEntry {
    /// New entry stamped with the current time
    pub fn new(name: &str, score: u64, level: u32, play_time_secs: u32) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            level,
            play_time_secs,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Leaderboard order: higher score first, then shorter run
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.play_time_secs.cmp(&other.play_time_secs))
    }

    /// Parse one line; `None` if it doesn't have exactly five valid fields
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let name = fields.next()?.to_string();
        let score = fields.next()?.parse().ok()?;
        let level = fields.next()?.parse().ok()?;
        let play_time_secs = fields.next()?.parse().ok()?;
        let timestamp = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            name,
            score,
            level,
            play_time_secs,
            timestamp,
        })
    }

    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.score, self.level, self.play_time_secs, self.timestamp
        )
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index a run would be inserted at (ties go after existing entries)
    fn insertion_index(&self, score: u64, play_time_secs: u32) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score || (score == e.score && play_time_secs < e.play_time_secs))
            .unwrap_or(self.entries.len())
    }

    /// Check if a run would make the board
    pub fn qualifies(&self, score: u64, play_time_secs: u32) -> bool {
        self.insertion_index(score, play_time_secs) < LEADERBOARD_CAPACITY
    }

    /// Get the rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64, play_time_secs: u32) -> Option<usize> {
        let index = self.insertion_index(score, play_time_secs);
        (index < LEADERBOARD_CAPACITY).then_some(index + 1)
    }

    /// Add an entry, keeping order and capacity.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let index = self.insertion_index(entry.score, entry.play_time_secs);
        self.entries.insert(index, entry);

        // Trim to max size
        self.entries.truncate(LEADERBOARD_CAPACITY);

        (index < LEADERBOARD_CAPACITY).then_some(index + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse the line format, silently skipping malformed lines
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Parse raw file bytes. Each line is decoded on its own, so a line that
    /// is not UTF-8 is skipped like any other malformed line.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let lines = bytes.split(|&b| b == b'\n').filter_map(|raw| {
            let line = std::str::from_utf8(raw).ok();
            if line.is_none() {
                log::debug!("Skipping undecodable leaderboard line: {raw:?}");
            }
            line
        });
        Self::from_lines(lines)
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let mut entries: Vec<LeaderboardEntry> = lines
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let entry = LeaderboardEntry::parse_line(line);
                if entry.is_none() {
                    log::debug!("Skipping malformed leaderboard line: {line:?}");
                }
                entry
            })
            .collect();
        entries.sort_by(LeaderboardEntry::rank_cmp);
        entries.truncate(LEADERBOARD_CAPACITY);
        Self { entries }
    }

    /// Serialize to the line format
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.to_line());
            text.push('\n');
        }
        text
    }

    /// Load the leaderboard. A missing file is an empty board.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        match fs::read(path) {
            Ok(bytes) => {
                let board = Self::parse_bytes(&bytes);
                log::info!("Loaded {} high scores", board.entries.len());
                Ok(board)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the leaderboard, replacing any previous file
    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        fs::write(path, self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a play time as `m:ss`
pub fn format_play_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a timestamp relative to `now` (both unix seconds)
pub fn format_date(timestamp: i64, now: i64) -> String {
    let diff_secs = (now - timestamp).max(0);
    let diff_mins = diff_secs / 60;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_days >= 1 {
        if diff_days == 1 {
            "Yesterday".to_string()
        } else if diff_days < 7 {
            format!("{} days ago", diff_days)
        } else {
            DateTime::<Utc>::from_timestamp(timestamp, 0)
                .map(|d| d.format("%m/%d/%y").to_string())
                .unwrap_or_else(|| "N/A".to_string())
        }
    } else if diff_hours >= 1 {
        if diff_hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", diff_hours)
        }
    } else if diff_mins >= 1 {
        if diff_mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", diff_mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(name: &str, score: u64, play_time_secs: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            level: 1,
            play_time_secs,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_tie_broken_by_play_time() {
        let mut board = Leaderboard::new();
        board.insert(entry("A", 100, 60));
        board.insert(entry("B", 100, 50));
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        // Same order survives a round trip through the file format
        let reparsed = Leaderboard::parse(&board.to_text());
        assert_eq!(reparsed, board);
    }

    #[test]
    fn test_insert_returns_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(entry("a", 50, 10)), Some(1));
        assert_eq!(board.insert(entry("b", 80, 10)), Some(1));
        assert_eq!(board.insert(entry("c", 60, 10)), Some(2));
        // Equal to an existing entry in every key: goes after it
        assert_eq!(board.insert(entry("d", 60, 10)), Some(3));
        assert_eq!(board.top_score(), Some(80));
    }

    #[test]
    fn test_capacity_enforced() {
        let mut board = Leaderboard::new();
        for i in 0..10 {
            board.insert(entry("p", 100 + i, 30));
        }
        assert_eq!(board.len(), 10);
        assert!(!board.qualifies(50, 30));
        assert_eq!(board.potential_rank(50, 30), None);
        assert_eq!(board.insert(entry("low", 50, 30)), None);
        assert_eq!(board.len(), 10);

        assert_eq!(board.potential_rank(105, 10), Some(5));
        assert_eq!(board.insert(entry("mid", 105, 10)), Some(5));
        assert_eq!(board.len(), 10);
        assert_eq!(board.entries.last().map(|e| e.score), Some(101));
    }

    #[test]
    fn test_zero_score_still_recorded() {
        let mut board = Leaderboard::new();
        assert!(board.qualifies(0, 3));
        assert_eq!(board.insert(entry("quick", 0, 3)), Some(1));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let text = "\
alice 30 2 45 1700000000
this line is broken
bob notanumber 1 1 1
carol 90 4 120 1700000100

dave 30 2 40 1700000200 extra
";
        let board = Leaderboard::parse(text);
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[test]
    fn test_parse_sorts_and_truncates() {
        let text: String = (0..15)
            .map(|i| format!("p{i} {} 1 10 0\n", i * 10))
            .collect();
        let board = Leaderboard::parse(&text);
        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.top_score(), Some(140));
        assert_eq!(board.entries.last().map(|e| e.score), Some(50));
    }

    #[test]
    fn test_entry_name_sanitized() {
        let e = LeaderboardEntry::new("Big Bird", 10, 1, 5);
        assert_eq!(e.name, "Big_Bird");
        assert_eq!(LeaderboardEntry::parse_line(&e.to_line()), Some(e));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "flappy_arcade_leaderboard_{}.dat",
            std::process::id()
        ));
        let mut board = Leaderboard::new();
        board.insert(entry("x", 12, 30));
        board.insert(entry("y", 7, 20));
        board.save(&path).unwrap();
        let loaded = Leaderboard::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("flappy_arcade_no_such_leaderboard.dat");
        let _ = fs::remove_file(&path);
        assert!(Leaderboard::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_undecodable_line() {
        let path = std::env::temp_dir().join(format!(
            "flappy_arcade_bad_bytes_{}.dat",
            std::process::id()
        ));
        fs::write(
            &path,
            b"ace 90 3 60 1700000000\n\xff\xfe 5 1 3 1700000001\r\nbob 50 2 40 1700000002\r\n",
        )
        .unwrap();
        let board = Leaderboard::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(board.len(), 2);
        assert_eq!(board.entries[0].name, "ace");
        assert_eq!(board.entries[1].name, "bob");
        assert_eq!(board.top_score(), Some(90));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_play_time(125), "2:05");
        assert_eq!(format_date(1000, 1030), "Just now");
        assert_eq!(format_date(0, 3 * 3600), "3 hours ago");
        assert_eq!(format_date(0, 86_400 + 5), "Yesterday");
        assert_eq!(format_date(0, 30 * 86_400), "01/01/70");
    }

    proptest! {
        #[test]
        fn prop_board_always_ordered(
            runs in prop::collection::vec((0u64..200, 0u32..300), 0..40)
        ) {
            let mut board = Leaderboard::new();
            for (score, time) in runs {
                board.insert(entry("p", score, time));
            }
            prop_assert!(board.len() <= LEADERBOARD_CAPACITY);
            for w in board.entries.windows(2) {
                prop_assert!(w[0].rank_cmp(&w[1]) != Ordering::Greater);
            }
        }
    }
}
