//! JSON persistence: the playlist document the downstream player reads,
//! and the rotation state that carries item recency across days.

use crate::document::PlaylistDocument;
use crate::error::GridcastError;
use crate::history::UsageHistory;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = ".rotation_state.json";

/// On-disk playlist schema. The entry and unfillable field names are a
/// contract with the downstream player — do not rename them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistFile {
    pub channel: String,
    pub date: NaiveDate,
    pub entries: Vec<PlaylistFileEntry>,
    pub unfillable: Vec<PlaylistFileGap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistFileEntry {
    pub start_time: NaiveTime,
    pub file_path: String,
    pub category: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistFileGap {
    pub slot_index: usize,
    pub start_time: NaiveTime,
    pub reason: String,
}

impl PlaylistFile {
    pub fn from_document(document: &PlaylistDocument, channel: &str) -> Self {
        PlaylistFile {
            channel: channel.to_string(),
            date: document.date,
            entries: document
                .entries
                .iter()
                .map(|e| PlaylistFileEntry {
                    start_time: e.start,
                    file_path: e.item.path.to_string_lossy().into_owned(),
                    category: e.item.category.clone(),
                    duration_seconds: e.actual_duration_secs,
                })
                .collect(),
            unfillable: document
                .unfillable
                .iter()
                .map(|u| PlaylistFileGap {
                    slot_index: u.slot_index,
                    start_time: u.start,
                    reason: u.reason.clone(),
                })
                .collect(),
            warnings: document
                .warnings
                .iter()
                .map(|w| format!("slot {}: {}", w.slot_index, w.message))
                .collect(),
        }
    }
}

/// Where the document for a date lives: `<output>/<YYYY>/<MM>/<YYYY-MM-DD>.json`.
pub fn document_path(output_dir: &Path, date: NaiveDate) -> PathBuf {
    output_dir
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{}.json", date.format("%Y-%m-%d")))
}

/// Serialize the document and write it under the output directory.
/// Returns the path written.
pub fn save_document(
    document: &PlaylistDocument,
    channel: &str,
    output_dir: &Path,
) -> Result<PathBuf, GridcastError> {
    let path = document_path(output_dir, document.date);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = PlaylistFile::from_document(document, channel);
    fs::write(&path, serde_json::to_string_pretty(&file)?)?;
    tracing::info!(path = %path.display(), entries = file.entries.len(), "playlist written");
    Ok(path)
}

/// Load persisted rotation state, starting fresh when the file is missing
/// or corrupt.
pub fn load_history(output_dir: &Path) -> UsageHistory {
    let path = output_dir.join(STATE_FILE);
    if path.exists() {
        match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(history) => return history,
                Err(e) => tracing::warn!("corrupt rotation state, starting fresh: {e}"),
            },
            Err(e) => tracing::warn!("could not read rotation state: {e}"),
        }
    }
    UsageHistory::new()
}

/// Persist rotation state for the next run.
pub fn save_history(history: &UsageHistory, output_dir: &Path) -> Result<(), GridcastError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(STATE_FILE);
    fs::write(&path, serde_json::to_string_pretty(history)?)?;
    Ok(())
}
