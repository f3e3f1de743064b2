use crate::media::MediaItem;
use crate::template::ScheduleTemplate;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One filled slot: the chosen item and when it goes to air.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub slot_index: usize,
    pub item: MediaItem,
    pub start: NaiveTime,
    pub actual_duration_secs: f64,
}

/// A slot no acceptable item could be selected for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfillableSlot {
    pub slot_index: usize,
    pub start: NaiveTime,
    pub reason: String,
}

/// Non-fatal note attached to a filled slot, e.g. a duration mismatch
/// beyond tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWarning {
    pub slot_index: usize,
    pub message: String,
}

/// The finalized schedule for one day. Created fresh per generation run,
/// handed to storage, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDocument {
    pub date: NaiveDate,
    pub entries: Vec<PlaylistEntry>,
    pub unfillable: Vec<UnfillableSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SlotWarning>,
}

impl PlaylistDocument {
    pub fn new(date: NaiveDate) -> Self {
        PlaylistDocument {
            date,
            entries: Vec::new(),
            unfillable: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_fully_filled(&self) -> bool {
        self.unfillable.is_empty()
    }

    /// Check the document against the template it was assembled from.
    /// Returns every violation found; an empty list means the document
    /// is well-formed. A non-empty list after assembly indicates a bug
    /// in the policy or assembler, not bad input.
    pub fn validate(&self, template: &ScheduleTemplate) -> Vec<String> {
        let mut violations = Vec::new();

        for entry in &self.entries {
            let Some(slot) = template.slots.get(entry.slot_index) else {
                violations.push(format!(
                    "entry references slot {} beyond template length {}",
                    entry.slot_index,
                    template.len()
                ));
                continue;
            };
            if entry.start != slot.start {
                violations.push(format!(
                    "entry for slot {} starts at {} instead of {}",
                    entry.slot_index,
                    entry.start.format("%H:%M:%S"),
                    slot.start_display()
                ));
            }
            if entry.item.category != slot.category {
                violations.push(format!(
                    "entry for slot {} has category '{}', slot requires '{}'",
                    entry.slot_index, entry.item.category, slot.category
                ));
            }
        }

        for pair in self.entries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.slot_index <= a.slot_index {
                violations.push(format!(
                    "entries out of slot order: {} then {}",
                    a.slot_index, b.slot_index
                ));
            }
            if b.start <= a.start {
                violations.push(format!(
                    "entries out of airtime order: {} then {}",
                    a.start.format("%H:%M:%S"),
                    b.start.format("%H:%M:%S")
                ));
            }
            // Overlap is judged on slot windows; duration overruns within
            // a slot are soft warnings, not violations.
            if let (Some(sa), Some(sb)) = (
                template.slots.get(a.slot_index),
                template.slots.get(b.slot_index),
            ) {
                if sa.end_secs() > sb.start.num_seconds_from_midnight() as f64 {
                    violations.push(format!(
                        "slot {} window overlaps slot {}",
                        a.slot_index, b.slot_index
                    ));
                }
            }
        }

        let mut seen: Vec<usize> = self
            .entries
            .iter()
            .map(|e| e.slot_index)
            .chain(self.unfillable.iter().map(|u| u.slot_index))
            .collect();
        seen.sort_unstable();
        for pair in seen.windows(2) {
            if pair[0] == pair[1] {
                violations.push(format!("slot {} recorded more than once", pair[0]));
            }
        }

        violations
    }
}
