use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single video file discovered on storage.
///
/// Immutable once scanned — rotation bookkeeping lives in
/// [`crate::history::UsageHistory`], keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable identifier: the canonical path string.
    pub id: String,
    pub path: PathBuf,
    pub category: String,
    pub duration_secs: f64,
}

impl MediaItem {
    pub fn new(path: impl Into<PathBuf>, category: impl Into<String>, duration_secs: f64) -> Self {
        let path = path.into();
        MediaItem {
            id: path.to_string_lossy().into_owned(),
            path,
            category: category.into(),
            duration_secs,
        }
    }

    /// File name without directory, for display and listings.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }

    /// Format duration as MM:SS.
    pub fn duration_display(&self) -> String {
        let secs = self.duration_secs.round() as u64;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Whether a path looks like a video file the channel can play.
pub fn is_video_file(path: &Path) -> bool {
    const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "mov", "avi", "flv"];
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            VIDEO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}
