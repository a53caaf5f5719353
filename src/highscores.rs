//! The persistent high-score table
use crate::consts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One finished game
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Local time at which the game ended, as `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// The best scores, highest first, at most
/// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] of them.  Serialized as a
/// plain JSON array of records.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HighScoreTable(Vec<ScoreRecord>);

impl HighScoreTable {
    pub fn records(&self) -> &[ScoreRecord] {
        &self.0
    }

    /// The best score in the table, or 0 if the table is empty
    pub fn high_score(&self) -> u32 {
        self.0.first().map_or(0, |r| r.score)
    }

    /// Add a record, keeping the table sorted and capped.  Returns `true` if
    /// the record ends up ranked first.  Equal scores keep their insertion
    /// order, so a record that only ties the top score is ranked behind it.
    pub fn insert(&mut self, record: ScoreRecord) -> bool {
        let is_first = self.0.first().is_none_or(|top| record.score > top.score);
        self.0.push(record);
        self.normalize();
        is_first
    }

    /// Sort descending by score, preserving the order of equal scores, and
    /// drop everything past the cap
    fn normalize(&mut self) {
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::MAX_HIGH_SCORES);
    }

    fn read(path: &Path) -> Result<HighScoreTable, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HighScoreTable::default())
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        let mut table: HighScoreTable =
            serde_json::from_slice(&src).map_err(LoadError::deserialize)?;
        table.normalize();
        Ok(table)
    }

    fn write(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// Owns the high-score table for the life of the program and keeps the
/// score file in sync with it.
///
/// Problems reading the file are never fatal: a missing or malformed file
/// gives an empty table.  Problems writing the file are logged and otherwise
/// ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreStore {
    /// Where the table is persisted; `None` keeps it in memory only
    path: Option<PathBuf>,
    table: HighScoreTable,
}

impl ScoreStore {
    /// Create a store backed by the file at `path` and load the table from
    /// it
    pub fn open<P: Into<PathBuf>>(path: P) -> ScoreStore {
        let mut store = ScoreStore {
            path: Some(path.into()),
            table: HighScoreTable::default(),
        };
        store.load();
        store
    }

    /// Create a store that is never written to disk
    pub fn in_memory() -> ScoreStore {
        ScoreStore {
            path: None,
            table: HighScoreTable::default(),
        }
    }

    /// (Re)read the table from disk.  Any failure leaves the table empty.
    pub fn load(&mut self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        self.table = match HighScoreTable::read(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} high scores from {}",
                    table.records().len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::warn!("{}; starting with no high scores", describe(&e));
                HighScoreTable::default()
            }
        };
    }

    /// Write the table to disk
    pub fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        self.table.write(path)?;
        log::info!(
            "High scores saved ({} entries) to {}",
            self.table.records().len(),
            path.display()
        );
        Ok(())
    }

    /// Record a finished game's score with the current local time and save
    /// the table.  Returns `true` if the score is the new top score.
    pub fn submit(&mut self, score: u32) -> bool {
        let timestamp = chrono::Local::now()
            .format(consts::TIMESTAMP_FORMAT)
            .to_string();
        self.submit_at(score, timestamp)
    }

    /// Like [`ScoreStore::submit()`], but with an explicit timestamp
    pub fn submit_at(&mut self, score: u32, timestamp: String) -> bool {
        let is_high = self.table.insert(ScoreRecord { score, timestamp });
        if let Err(e) = self.save() {
            log::warn!("{}", describe(&e));
        }
        is_high
    }

    pub fn records(&self) -> &[ScoreRecord] {
        self.table.records()
    }

    /// The first `n` records
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        let records = self.table.records();
        &records[..n.min(records.len())]
    }

    pub fn high_score(&self) -> u32 {
        self.table.high_score()
    }
}

/// Render an error and its chain of causes on one line
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut s = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        s.push_str(": ");
        s.push_str(&cause.to_string());
        source = cause.source();
    }
    s
}

#[derive(Debug, Error)]
#[error("failed to save high scores to disk")]
pub struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("failed to read high scores from disk")]
pub struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
