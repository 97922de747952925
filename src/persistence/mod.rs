//! Score persistence
//!
//! Backends implement [`ScoreStore`]:
//! - [`MemoryStore`]: in-process only, used by tests and guest play
//! - [`JsonFileStore`]: versioned JSON document, written to a temp file and
//!   renamed over the previous save

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::{Leaderboard, LeaderboardEntry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed score data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),
    #[error("level {0} is not a valid level")]
    InvalidLevel(u32),
}

/// Persistent per-player progress
pub trait ScoreStore: Debug {
    /// Make sure `player` exists so they show up on the leaderboard
    fn register_player(&mut self, player: &str) -> Result<(), StoreError>;

    /// Best recorded score, 0 if none
    fn best_score(&self, player: &str, level: u32) -> Result<u32, StoreError>;

    /// Store `score` if it beats the current best. Returns true if stored.
    fn record_score_if_better(
        &mut self,
        player: &str,
        level: u32,
        score: u32,
        stars: u8,
    ) -> Result<bool, StoreError>;

    /// Level 1 is always unlocked
    fn is_level_unlocked(&self, player: &str, level: u32) -> Result<bool, StoreError>;

    fn unlock_level(&mut self, player: &str, level: u32) -> Result<(), StoreError>;

    fn leaderboard(&self) -> Result<Leaderboard, StoreError>;
}

/// Best result on one level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub score: u32,
    pub stars: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    pub levels: BTreeMap<u32, LevelRecord>,
    pub unlocked: BTreeSet<u32>,
}

impl PlayerRecord {
    pub fn total_score(&self) -> u64 {
        self.levels.values().map(|r| r.score as u64).sum()
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels.values().filter(|r| r.score > 0).count() as u32
    }

    pub fn total_stars(&self) -> u32 {
        self.levels.values().map(|r| r.stars as u32).sum()
    }
}

/// Every player's progress, shared by the store backends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    pub players: BTreeMap<String, PlayerRecord>,
}

fn check_level(level: u32) -> Result<(), StoreError> {
    if level == 0 {
        Err(StoreError::InvalidLevel(level))
    } else {
        Ok(())
    }
}

impl ScoreBook {
    pub fn register(&mut self, player: &str) -> bool {
        if self.players.contains_key(player) {
            return false;
        }
        self.players.insert(player.to_string(), PlayerRecord::default());
        true
    }

    pub fn best_score(&self, player: &str, level: u32) -> Result<u32, StoreError> {
        check_level(level)?;
        Ok(self
            .players
            .get(player)
            .and_then(|p| p.levels.get(&level))
            .map_or(0, |r| r.score))
    }

    /// Stars are only replaced together with a better score
    pub fn record(
        &mut self,
        player: &str,
        level: u32,
        score: u32,
        stars: u8,
    ) -> Result<bool, StoreError> {
        check_level(level)?;
        let record = self
            .players
            .entry(player.to_string())
            .or_default()
            .levels
            .entry(level)
            .or_default();
        if score > record.score {
            *record = LevelRecord { score, stars };
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_unlocked(&self, player: &str, level: u32) -> Result<bool, StoreError> {
        check_level(level)?;
        Ok(level == 1
            || self
                .players
                .get(player)
                .is_some_and(|p| p.unlocked.contains(&level)))
    }

    /// Returns true if the level was newly unlocked
    pub fn unlock(&mut self, player: &str, level: u32) -> Result<bool, StoreError> {
        check_level(level)?;
        Ok(self
            .players
            .entry(player.to_string())
            .or_default()
            .unlocked
            .insert(level))
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::from_entries(self.players.iter().map(|(name, record)| LeaderboardEntry {
            name: name.clone(),
            total_score: record.total_score(),
            levels_completed: record.levels_completed(),
            total_stars: record.total_stars(),
        }))
    }
}
