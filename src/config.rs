use crate::selection::DEFAULT_DURATION_TOLERANCE;
use crate::template::{ScheduleSlot, ScheduleTemplate};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback duration for scanned files, in seconds (15 minutes). The
/// scanner never probes media; durations come from configuration.
pub const DEFAULT_ITEM_DURATION_SECS: f64 = 900.0;

/// Process configuration, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory holding one sub-directory per category.
    pub video_directory: PathBuf,
    /// Where playlist documents and rotation state are written.
    pub output_directory: PathBuf,
    /// Channel name stamped into every playlist document.
    pub channel_name: String,
    /// Fractional slot over-run allowance for duration fitting.
    pub duration_tolerance: f64,
    /// Duration assigned to scanned files, in seconds.
    pub default_duration_secs: f64,
    /// The day's fixed slots, in airtime order.
    pub slots: Vec<SlotConfig>,
}

/// One configured slot: when it airs, what it airs, for how long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    pub start: NaiveTime,
    pub category: String,
    pub target_duration_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let slot = |h, m, category: &str, secs: f64| SlotConfig {
            start: NaiveTime::from_hms_opt(h, m, 0).expect("valid default slot time"),
            category: category.to_string(),
            target_duration_secs: secs,
        };
        AppConfig {
            video_directory: PathBuf::from("media"),
            output_directory: PathBuf::from("playlists"),
            channel_name: "Channel 1".to_string(),
            duration_tolerance: DEFAULT_DURATION_TOLERANCE,
            default_duration_secs: DEFAULT_ITEM_DURATION_SECS,
            slots: vec![
                slot(6, 0, "news", 1800.0),
                slot(7, 0, "music", 3600.0),
                slot(13, 0, "series", 3600.0),
                slot(18, 0, "news", 1800.0),
                slot(19, 0, "kids", 3600.0),
                slot(20, 0, "series", 7200.0),
                slot(23, 0, "documentary", 3600.0),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str(&data) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("corrupt config '{}', using defaults: {e}", path.display())
                    }
                },
                Err(e) => {
                    tracing::warn!("could not read config '{}', using defaults: {e}", path.display())
                }
            }
        }
        AppConfig::default()
    }

    /// The configured slots as a schedule template. Validation happens at
    /// assembly, not here.
    pub fn template(&self) -> ScheduleTemplate {
        ScheduleTemplate::new(
            self.slots
                .iter()
                .map(|s| ScheduleSlot::new(s.start, s.category.clone(), s.target_duration_secs))
                .collect(),
        )
    }
}
