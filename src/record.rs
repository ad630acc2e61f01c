#![cfg(feature = "std")]

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{game::GameSummary, player::GameRecorder};

/// One finished game of a named player, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    #[serde(flatten)]
    pub game: GameSummary,
}

/// Appends each finished game to a file as one JSON object per line, keyed by
/// the player's name.
#[derive(Debug, Clone)]
pub struct JsonLinesRecorder {
    path: PathBuf,
    player: String,
}

impl JsonLinesRecorder {
    pub fn new(path: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            player: player.into(),
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Append `summary` under this recorder's player, creating the file if needed.
    pub fn append(&self, summary: &GameSummary) -> anyhow::Result<()> {
        let record = PlayerRecord {
            player: self.player.clone(),
            game: *summary,
        };
        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Every stored game of `player`, oldest first. A missing file holds no games.
    pub fn history(&self, player: &str) -> anyhow::Result<Vec<PlayerRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut games = Vec::new();
        for (n, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PlayerRecord>(line) {
                Ok(record) if record.player == player => games.push(record),
                Ok(_) => {}
                Err(e) => log::warn!("{}:{}: skipping bad record: {}", self.path.display(), n + 1, e),
            }
        }
        Ok(games)
    }
}

impl GameRecorder for JsonLinesRecorder {
    fn record(&mut self, summary: &GameSummary) {
        if let Err(e) = self.append(summary) {
            log::error!("could not record game to {}: {}", self.path.display(), e);
        }
    }
}
