//! Player leaderboard
//!
//! Players are ranked by the sum of their per-level best scores.

use serde::{Deserialize, Serialize};

/// Rows shown on the leaderboard screen
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// One player's standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Sum of best scores over every level
    pub total_score: u64,
    /// Levels with a non-zero best score
    pub levels_completed: u32,
    pub total_stars: u32,
}

/// Every known player, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sorted by total score descending, ties broken by name
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        Self { entries }
    }

    /// Rows for display
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(MAX_LEADERBOARD_ENTRIES)]
    }

    /// 1-indexed position of `name`
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    pub fn entry(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if a total would make the displayed top rows
    pub fn qualifies(&self, total_score: u64) -> bool {
        if total_score == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.top()
            .last()
            .map(|e| total_score > e.total_score)
            .unwrap_or(true)
    }

    /// Get the rank a total would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, total_score: u64) -> Option<usize> {
        if !self.qualifies(total_score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| total_score > e.total_score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top total (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.total_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, total_score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            total_score,
            levels_completed: 1,
            total_stars: 0,
        }
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = Leaderboard::new();
        assert!(board.is_empty());
        assert!(board.qualifies(100));
        assert!(!board.qualifies(0));
        assert_eq!(board.rank_of("anyone"), None);
        assert_eq!(board.top_score(), None);
    }

    #[test]
    fn test_sorted_with_name_tiebreak() {
        let board = Leaderboard::from_entries(vec![
            entry("carol", 300),
            entry("bob", 500),
            entry("alice", 300),
        ]);
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bob", "alice", "carol"]);
        assert_eq!(board.rank_of("carol"), Some(3));
        assert_eq!(board.top_score(), Some(500));
    }

    #[test]
    fn test_potential_rank() {
        let board =
            Leaderboard::from_entries(vec![entry("a", 1000), entry("b", 500), entry("c", 250)]);
        assert_eq!(board.potential_rank(750), Some(2));
        assert_eq!(board.potential_rank(100), Some(4));
    }

    #[test]
    fn test_top_rows_capped() {
        let board = Leaderboard::from_entries((0..15).map(|i| entry(&format!("p{i:02}"), i * 100)));
        assert_eq!(board.top().len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.len(), 15);
        assert_eq!(board.rank_of("p00"), Some(15));
        // Lowest displayed row is 500
        assert!(!board.qualifies(500));
        assert!(board.qualifies(501));
    }
}
