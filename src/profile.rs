//! Player progress: per-level best scores and unlocks
//!
//! The profile keeps its own cache so the game never waits on, or fails
//! because of, the backing store. Store errors are logged and the cached
//! values are used instead.

use std::collections::{BTreeMap, BTreeSet};

use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::persistence::{ScoreStore, StoreError};

pub const MAX_STARS: u8 = 5;

/// Stars for `score` on `level`: one per `level * 100` points, up to five
pub fn calculate_stars(score: u32, level: u32) -> u8 {
    let threshold = level.max(1) * 100;
    (score / threshold).min(MAX_STARS as u32) as u8
}

#[derive(Debug)]
pub struct PlayerProfile {
    name: String,
    total_levels: u32,
    level_scores: BTreeMap<u32, u32>,
    unlocked: BTreeSet<u32>,
    store: Box<dyn ScoreStore>,
}

fn warn_on_err<T>(what: &str, result: Result<T, StoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Score store: {what} failed: {e}");
            None
        }
    }
}

impl PlayerProfile {
    pub fn new(total_levels: u32, store: Box<dyn ScoreStore>) -> Self {
        Self {
            name: String::new(),
            total_levels,
            level_scores: BTreeMap::new(),
            unlocked: BTreeSet::new(),
            store,
        }
    }

    /// Switch to `name` and load their progress. Blank names are ignored.
    pub fn set_player_name(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.name = name.to_string();
        self.level_scores.clear();
        self.unlocked.clear();

        warn_on_err("register player", self.store.register_player(name));
        for level in 1..=self.total_levels {
            let score = warn_on_err("load score", self.store.best_score(name, level)).unwrap_or(0);
            if score > 0 {
                self.level_scores.insert(level, score);
                // A scored level means the one after it was reached
                if level < self.total_levels {
                    self.unlocked.insert(level + 1);
                }
            }
            let unlocked = warn_on_err("load unlock", self.store.is_level_unlocked(name, level));
            if unlocked.unwrap_or(false) {
                self.unlocked.insert(level);
            }
        }
        log::info!(
            "Profile loaded for {}: {} level(s) completed, total {}",
            self.name,
            self.levels_completed(),
            self.total_score()
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn signed_in(&self) -> bool {
        !self.name.is_empty()
    }

    fn valid_level(&self, level: u32) -> bool {
        (1..=self.total_levels).contains(&level)
    }

    pub fn total_levels(&self) -> u32 {
        self.total_levels
    }

    pub fn best_score(&self, level: u32) -> u32 {
        self.level_scores.get(&level).copied().unwrap_or(0)
    }

    /// Keep `score` if it beats the best on `level`. Returns true if it did.
    pub fn record_score(&mut self, level: u32, score: u32) -> bool {
        if !self.valid_level(level) || score <= self.best_score(level) {
            return false;
        }
        self.level_scores.insert(level, score);
        if self.signed_in() {
            let stars = calculate_stars(score, level);
            warn_on_err(
                "save score",
                self.store.record_score_if_better(&self.name, level, score, stars),
            );
        }
        log::debug!("New best on level {level}: {score}");
        true
    }

    pub fn unlock_level(&mut self, level: u32) {
        if !self.valid_level(level) || !self.unlocked.insert(level) {
            return;
        }
        if self.signed_in() {
            warn_on_err("save unlock", self.store.unlock_level(&self.name, level));
        }
        log::info!("Level {level} unlocked");
    }

    /// Open every level (debug aid)
    pub fn unlock_all_levels(&mut self) {
        for level in 1..=self.total_levels {
            self.unlock_level(level);
        }
    }

    pub fn is_level_unlocked(&self, level: u32) -> bool {
        level == 1 || (self.valid_level(level) && self.unlocked.contains(&level))
    }

    pub fn stars(&self, level: u32) -> u8 {
        calculate_stars(self.best_score(level), level)
    }

    pub fn total_score(&self) -> u64 {
        self.level_scores.values().map(|&s| s as u64).sum()
    }

    pub fn levels_completed(&self) -> u32 {
        self.level_scores.values().filter(|&&s| s > 0).count() as u32
    }

    /// Store leaderboard, or just this player when the store is unavailable
    pub fn leaderboard(&self) -> Leaderboard {
        warn_on_err("load leaderboard", self.store.leaderboard()).unwrap_or_else(|| {
            let me = self.signed_in().then(|| LeaderboardEntry {
                name: self.name.clone(),
                total_score: self.total_score(),
                levels_completed: self.levels_completed(),
                total_stars: (1..=self.total_levels).map(|l| self.stars(l) as u32).sum(),
            });
            Leaderboard::from_entries(me)
        })
    }

    pub fn rank(&self) -> Option<usize> {
        if !self.signed_in() {
            return None;
        }
        self.leaderboard().rank_of(&self.name)
    }
}
