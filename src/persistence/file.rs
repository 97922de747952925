use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreBook, ScoreStore, StoreError};
use crate::highscores::Leaderboard;

/// Current on-disk format
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    book: ScoreBook,
}

/// JSON file store. Every mutation rewrites the whole document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    book: ScoreBook,
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl JsonFileStore {
    /// Open `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let book = match fs::read_to_string(&path) {
            Ok(json) => {
                let save: SaveFile = serde_json::from_str(&json)?;
                if save.version != FORMAT_VERSION {
                    return Err(StoreError::UnsupportedVersion(save.version));
                }
                log::info!(
                    "Loaded {} player(s) from {}",
                    save.book.players.len(),
                    path.display()
                );
                save.book
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", path.display());
                ScoreBook::default()
            }
            Err(e) => return Err(io_error(&path, e)),
        };
        Ok(Self { path, book })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to `<path>.tmp` then rename over the save
    fn flush(&self) -> Result<(), StoreError> {
        let save = SaveFile {
            version: FORMAT_VERSION,
            book: self.book.clone(),
        };
        let json = serde_json::to_string_pretty(&save)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        log::debug!("Scores saved to {}", self.path.display());
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn register_player(&mut self, player: &str) -> Result<(), StoreError> {
        if self.book.register(player) {
            self.flush()?;
        }
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
        let improved = self.book.record(player, level, score, stars)?;
        if improved {
            self.flush()?;
        }
        Ok(improved)
    }

    fn is_level_unlocked(&self, player: &str, level: u32) -> Result<bool, StoreError> {
        self.book.is_unlocked(player, level)
    }

    fn unlock_level(&mut self, player: &str, level: u32) -> Result<(), StoreError> {
        if self.book.unlock(player, level)? {
            self.flush()?;
        }
        Ok(())
    }

    fn leaderboard(&self) -> Result<Leaderboard, StoreError> {
        Ok(self.book.leaderboard())
    }
}
