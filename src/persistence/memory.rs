use super::{ScoreBook, ScoreStore, StoreError};
use crate::highscores::Leaderboard;

/// Volatile store; progress is lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    book: ScoreBook,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&self) -> &ScoreBook {
        &self.book
    }
}

impl ScoreStore for MemoryStore {
    fn register_player(&mut self, player: &str) -> Result<(), StoreError> {
        self.book.register(player);
        Ok(())
    }

    fn best_score(&self, player: &str, level: u32) -> Result<u32, StoreError> {
        self.book.best_score(player, level)
    }

    fn record_score_if_better(
        &mut self,
        player: &str,
        level: u32,
        score: u32,
        stars: u8,
    ) -> Result<bool, StoreError> {
        self.book.record(player, level, score, stars)
    }

    fn is_level_unlocked(&self, player: &str, level: u32) -> Result<bool, StoreError> {
        self.book.is_unlocked(player, level)
    }

    fn unlock_level(&mut self, player: &str, level: u32) -> Result<(), StoreError> {
        self.book.unlock(player, level).map(|_| ())
    }

    fn leaderboard(&self) -> Result<Leaderboard, StoreError> {
        Ok(self.book.leaderboard())
    }
}
