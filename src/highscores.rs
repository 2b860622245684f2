//! High score leaderboard
//!
//! Tracks the top 10 finished games. Storage is the host's job; the table
//! only converts to and from JSON text.

use serde::{Deserialize, Serialize};

use crate::sim::state::FinalResult;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Letters in a player's initials
pub const INITIALS_LEN: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Three upper-case letters
    pub initials: String,
    pub score: u64,
    /// Level reached (1-based)
    pub level: u32,
}

/// High score leaderboard, sorted by descending score
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

/// Upper-case, keep letters only, pad with `A` to three characters
pub fn normalize_initials(raw: &str) -> String {
    let mut initials: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(INITIALS_LEN)
        .collect();
    while initials.len() < INITIALS_LEN {
        initials.push('A');
    }
    initials
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Table slot a score would land in; equal scores stay behind earlier ones
    fn slot(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= score);
        (index < MAX_HIGH_SCORES).then_some(index)
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.slot(score).is_some()
    }

    /// 1-based rank a score would earn
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.slot(score).map(|index| index + 1)
    }

    /// Insert a qualifying score and return its 1-based rank
    pub fn add_score(&mut self, initials: &str, score: u64, level: u32) -> Option<usize> {
        let index = self.slot(score)?;
        self.entries.insert(
            index,
            HighScoreEntry {
                initials: normalize_initials(initials),
                score,
                level,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score #{}: {score} (level {level})", index + 1);
        Some(index + 1)
    }

    /// Submit a finished game
    pub fn submit(&mut self, initials: &str, result: FinalResult) -> Option<usize> {
        self.add_score(initials, result.score, result.level)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
