use crate::error::GridcastError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Seconds in a broadcast day. A slot may close exactly here (24:00:00
/// is a valid end-of-day), but never later.
const DAY_SECS: f64 = 86_400.0;

/// A fixed time window in the daily template requiring one item of a
/// given category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Time of day the slot goes to air (HH:MM:SS).
    pub start: NaiveTime,
    /// Category the slot must be filled from.
    pub category: String,
    /// Intended airtime of the slot in seconds.
    pub target_duration_secs: f64,
}

impl ScheduleSlot {
    pub fn new(start: NaiveTime, category: impl Into<String>, target_duration_secs: f64) -> Self {
        ScheduleSlot {
            start,
            category: category.into(),
            target_duration_secs,
        }
    }

    /// When the slot window closes, in seconds from midnight. May equal
    /// 86 400 for a slot running up to exactly 24:00:00.
    pub fn end_secs(&self) -> f64 {
        self.start.num_seconds_from_midnight() as f64 + self.target_duration_secs
    }

    /// End of the slot window as a time of day. `None` when the window
    /// closes at or past midnight — 24:00:00 has no `NaiveTime`
    /// representation; use [`Self::end_secs`] for window comparisons.
    pub fn end(&self) -> Option<NaiveTime> {
        if self.end_secs() >= DAY_SECS {
            return None;
        }
        let dur = chrono::Duration::milliseconds((self.target_duration_secs * 1000.0) as i64);
        Some(self.start.overflowing_add_signed(dur).0)
    }

    /// Format the start time as HH:MM:SS.
    pub fn start_display(&self) -> String {
        self.start.format("%H:%M:%S").to_string()
    }
}

/// The day's programming template — an ordered sequence of slots, fixed
/// and read-only for the duration of one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub slots: Vec<ScheduleSlot>,
}

impl ScheduleTemplate {
    pub fn new(slots: Vec<ScheduleSlot>) -> Self {
        ScheduleTemplate { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check the structural invariants: positive durations, no wrap past
    /// midnight, strict ordering by start time, no overlapping windows.
    /// A template failing any of these is rejected before assembly.
    pub fn validate(&self) -> Result<(), GridcastError> {
        for (i, slot) in self.slots.iter().enumerate() {
            if !(slot.target_duration_secs > 0.0) {
                return Err(GridcastError::InvalidTemplate(format!(
                    "slot {} ({}) has non-positive target duration {}",
                    i,
                    slot.start_display(),
                    slot.target_duration_secs
                )));
            }
            if slot.end_secs() > DAY_SECS {
                return Err(GridcastError::InvalidTemplate(format!(
                    "slot {} ({}) extends past midnight",
                    i,
                    slot.start_display()
                )));
            }
        }
        for (i, pair) in self.slots.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            if b.start <= a.start {
                return Err(GridcastError::InvalidTemplate(format!(
                    "slot {} ({}) does not start after slot {} ({})",
                    i + 1,
                    b.start_display(),
                    i,
                    a.start_display()
                )));
            }
            if a.end_secs() > b.start.num_seconds_from_midnight() as f64 {
                return Err(GridcastError::InvalidTemplate(format!(
                    "slot {} ({}) overlaps slot {} ({})",
                    i,
                    a.start_display(),
                    i + 1,
                    b.start_display()
                )));
            }
        }
        Ok(())
    }
}

/// Parse a time string in HH:MM or HH:MM:SS format.
pub fn parse_time(s: &str) -> Result<NaiveTime, GridcastError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| {
            GridcastError::InvalidTemplate(format!(
                "invalid time '{}', expected HH:MM or HH:MM:SS",
                s
            ))
        })
}
