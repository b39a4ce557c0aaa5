//! Run summaries and the top-10 leaderboard
//!
//! Storage is the host's job; this module only decides what a finished run
//! looks like and where it ranks.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::session::level_for_score;
use crate::sim::{Death, GameState};

/// Maximum number of leaderboard entries to keep
pub const LEADERBOARD_LIMIT: usize = 10;
/// Longest player name kept (in characters)
pub const MAX_NAME_LEN: usize = 20;
/// Name used when none is given
pub const DEFAULT_NAME: &str = "Anonymous";

/// Badge shown on the game-over card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Legend,
}

impl Tier {
    /// Highest tier reached by `score`, if any
    pub fn for_score(score: u32) -> Option<Tier> {
        match score {
            60.. => Some(Tier::Legend),
            50..=59 => Some(Tier::Gold),
            40..=49 => Some(Tier::Silver),
            30..=39 => Some(Tier::Bronze),
            _ => None,
        }
    }

    pub fn min_score(&self) -> u32 {
        match self {
            Tier::Bronze => 30,
            Tier::Silver => 40,
            Tier::Gold => 50,
            Tier::Legend => 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze Tier 30+",
            Tier::Silver => "Silver Tier 40+",
            Tier::Gold => "Gold Tier 50+",
            Tier::Legend => "Legend Tier 60+",
        }
    }
}

/// Everything the score keeper reads at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    pub death: Option<Death>,
    pub level: u32,
    /// Tick interval in effect when the run ended
    pub tick_ms: u32,
    /// Simulated play time, pauses excluded
    pub duration_ms: u64,
    /// "{cols}x{rows}"
    pub board_size: String,
    pub tier: Option<Tier>,
}

impl RunSummary {
    pub fn new<S>(state: &GameState<S>, tick_ms: u32, duration_ms: u64) -> Self {
        Self {
            score: state.score,
            death: state.last_death,
            level: level_for_score(state.score),
            tick_ms,
            duration_ms,
            board_size: state.grid.label(),
            tier: Tier::for_score(state.score),
        }
    }

    /// Leaderboard entry for this run
    pub fn to_entry(&self, name: Option<&str>, timestamp_ms: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: normalize_name(name),
            score: self.score,
            timestamp_ms,
            duration_ms: self.duration_ms,
            level: self.level,
            tick_ms: self.tick_ms,
            board_size: self.board_size.clone(),
        }
    }
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
    pub duration_ms: u64,
    pub level: u32,
    pub tick_ms: u32,
    pub board_size: String,
}

impl LeaderboardEntry {
    /// Ranking order: higher score, then faster run, then earlier date
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.duration_ms.cmp(&other.duration_ms))
            .then(self.timestamp_ms.cmp(&other.timestamp_ms))
    }
}

/// Trimmed, at most `MAX_NAME_LEN` characters, `DEFAULT_NAME` when blank
pub fn normalize_name(name: Option<&str>) -> String {
    let trimmed: String = name
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .take(MAX_NAME_LEN)
        .collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a duration as "m:ss"
pub fn format_duration(ms: u64) -> String {
    let total = ms / 1000;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Higher of a stored best score and a new result
pub fn best_score(stored: u32, score: u32) -> u32 {
    stored.max(score)
}

/// Top-10 leaderboard, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
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

    /// Rebuild from arbitrary entries: runs without a level or tick interval are
    /// dropped, the rest sorted, names normalized, trimmed to size
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut entries: Vec<LeaderboardEntry> = entries
            .into_iter()
            .filter(|e| e.level >= 1 && e.tick_ms >= 1)
            .map(|mut e| {
                e.name = normalize_name(Some(&e.name));
                e
            })
            .collect();
        entries.sort_by(LeaderboardEntry::rank_cmp);
        entries.truncate(LEADERBOARD_LIMIT);
        Self { entries }
    }

    /// Index a candidate would take (ties go after existing entries)
    fn insertion_index(&self, candidate: &LeaderboardEntry) -> usize {
        self.entries
            .iter()
            .position(|e| candidate.rank_cmp(e) == Ordering::Less)
            .unwrap_or(self.entries.len())
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, candidate: &LeaderboardEntry) -> bool {
        candidate.score > 0 && self.insertion_index(candidate) < LEADERBOARD_LIMIT
    }

    /// Get the rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, candidate: &LeaderboardEntry) -> Option<usize> {
        self.qualifies(candidate)
            .then(|| self.insertion_index(candidate) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, candidate: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(&candidate) {
            return None;
        }
        let idx = self.insertion_index(&candidate);
        log::info!(
            "Leaderboard rank {} for {} ({} pts)",
            idx + 1,
            candidate.name,
            candidate.score
        );
        self.entries.insert(idx, candidate);
        self.entries.truncate(LEADERBOARD_LIMIT);
        Some(idx + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
