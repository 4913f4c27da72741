use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "arcade-snake";
const SCORE_FILE_NAME: &str = "best_score.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    best_score: u32,
}

/// Failures reading or writing the best-score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("best score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("best score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the platform-correct best-score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the best score from disk.
///
/// Returns `Ok(0)` when the file does not exist yet (first run).
pub fn load_best_score() -> Result<u32, ScoreError> {
    load_best_score_from_path(&scores_path())
}

/// Persists `final_score` when it beats the stored best.
///
/// Returns whether a new record was written.
pub fn record_best_score(final_score: u32) -> Result<bool, ScoreError> {
    record_best_score_at_path(&scores_path(), final_score)
}

fn load_best_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.best_score)
}

fn save_best_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { best_score: score };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, json)?;
    Ok(())
}

fn record_best_score_at_path(path: &Path, final_score: u32) -> Result<bool, ScoreError> {
    // An unreadable file is overwritten rather than blocking new records.
    let stored = load_best_score_from_path(path).unwrap_or(0);
    if final_score <= stored {
        return Ok(false);
    }

    save_best_score_to_path(path, final_score)?;
    Ok(true)
}
