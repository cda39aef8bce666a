//! Pending learning records awaiting upload.
//!
//! Each record is one JSON file under `.learnsync/learnings/`. A record is removed
//! only after the remote service has accepted it, so anything still on disk is
//! retried by the next sync.

use crate::core::error::LearnsyncError;
use crate::core::store::Store;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecord {
    pub file_path: String,
    pub function_name: String,
    pub library_name: String,
    pub description: String,
    pub code_snippet: String,
    /// Display label, only used when reporting failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A record file on disk that has not been parsed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub path: PathBuf,
}

impl PendingRecord {
    /// File name, used as the label when the record cannot be parsed.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn read(&self) -> Result<LearningRecord, LearnsyncError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            LearnsyncError::RecordParseFailed(format!("{}: {}", self.file_name(), e))
        })?;
        parse_record(&raw)
            .map_err(|e| LearnsyncError::RecordParseFailed(format!("{}: {}", self.file_name(), e)))
    }

    pub fn remove(&self) -> Result<(), LearnsyncError> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

fn parse_record(raw: &str) -> Result<LearningRecord, serde_json::Error> {
    serde_json::from_str(raw)
}

/// List pending record files.
///
/// Returns `None` when the pending directory does not exist. Only `*.json` files
/// are considered; order follows the directory listing and is not sorted.
pub fn list_pending(store: &Store) -> Result<Option<Vec<PendingRecord>>, LearnsyncError> {
    let dir = store.pending_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LearnsyncError::IoError(e)),
    };

    let mut records = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_json(&path) {
            records.push(PendingRecord { path });
        }
    }
    Ok(Some(records))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Persist a new pending record under a fresh ULID file name.
pub fn enqueue(store: &Store, record: &LearningRecord) -> Result<PendingRecord, LearnsyncError> {
    let dir = store.pending_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.json", ulid::Ulid::new()));
    fs::write(&path, serde_json::to_string_pretty(record)?)?;
    Ok(PendingRecord { path })
}
