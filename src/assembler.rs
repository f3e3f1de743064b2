use crate::catalog::Catalog;
use crate::document::{PlaylistDocument, PlaylistEntry, SlotWarning, UnfillableSlot};
use crate::error::GridcastError;
use crate::history::UsageHistory;
use crate::selection::SelectionPolicy;
use crate::template::ScheduleTemplate;
use chrono::NaiveDate;

/// Reason attached to a slot nothing could be selected for. Part of the
/// document contract with the downstream player.
pub const REASON_NO_CANDIDATE: &str = "no candidate in category";

/// Drive the template through the selection policy against the catalog
/// and produce the day's playlist document.
///
/// Slots are processed strictly in template order — the history must
/// observe selections in airtime order for rotation to be correct. A slot
/// with no candidate is recorded as unfillable and the run continues; the
/// document always comes back, possibly partial, and the caller decides
/// whether gaps are acceptable.
///
/// Fatal failures: a structurally invalid template is rejected up front,
/// and a document failing its own self-check after assembly aborts with
/// `AssemblyInvariantViolation`.
pub fn assemble(
    template: &ScheduleTemplate,
    catalog: &Catalog,
    policy: &SelectionPolicy,
    history: &mut UsageHistory,
    date: NaiveDate,
) -> Result<PlaylistDocument, GridcastError> {
    template.validate()?;

    let mut document = PlaylistDocument::new(date);

    for (slot_index, slot) in template.slots.iter().enumerate() {
        match policy.select(catalog, &slot.category, slot.target_duration_secs, history) {
            Some(item) => {
                if policy.exceeds_tolerance(item.duration_secs, slot.target_duration_secs) {
                    document.warnings.push(SlotWarning {
                        slot_index,
                        message: format!(
                            "'{}' runs {:.0}s against a {:.0}s slot",
                            item.file_name(),
                            item.duration_secs,
                            slot.target_duration_secs
                        ),
                    });
                }
                document.entries.push(PlaylistEntry {
                    slot_index,
                    item: item.clone(),
                    start: slot.start,
                    actual_duration_secs: item.duration_secs,
                });
            }
            None => {
                tracing::warn!(
                    category = %slot.category,
                    start = %slot.start_display(),
                    "slot unfillable"
                );
                document.unfillable.push(UnfillableSlot {
                    slot_index,
                    start: slot.start,
                    reason: REASON_NO_CANDIDATE.to_string(),
                });
            }
        }
    }

    let violations = document.validate(template);
    if !violations.is_empty() {
        return Err(GridcastError::AssemblyInvariantViolation(
            violations.join("; "),
        ));
    }

    Ok(document)
}
