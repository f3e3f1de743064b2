use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rotation bookkeeping for one generation run.
///
/// Records when each media item was last chosen, on a monotonic tick that
/// advances once per selection. The selection policy reads this to rank
/// least-recently-used items first; items it has never seen rank before
/// everything else. The history is the only mutable state a run touches,
/// and each run owns its own instance — persist it across runs (see
/// `storage`) to carry rotation over day boundaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageHistory {
    marks: HashMap<String, u64>,
    clock: u64,
}

impl UsageHistory {
    pub fn new() -> Self {
        UsageHistory {
            marks: HashMap::new(),
            clock: 0,
        }
    }

    /// Tick when the item was last selected, `None` if never.
    pub fn last_used(&self, id: &str) -> Option<u64> {
        self.marks.get(id).copied()
    }

    /// Record a selection. Must be called exactly once per chosen item,
    /// before the next slot is processed — rotation correctness depends
    /// on selections being observed in airtime order.
    pub fn mark_used(&mut self, id: &str) {
        self.clock += 1;
        self.marks.insert(id.to_string(), self.clock);
    }

    /// Number of distinct items ever selected.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_items_have_no_mark() {
        let history = UsageHistory::new();
        assert_eq!(history.last_used("a.mp4"), None);
        assert!(history.is_empty());
    }

    #[test]
    fn marks_advance_monotonically() {
        let mut history = UsageHistory::new();
        history.mark_used("a.mp4");
        history.mark_used("b.mp4");
        let a = history.last_used("a.mp4").unwrap();
        let b = history.last_used("b.mp4").unwrap();
        assert!(a < b);
    }

    #[test]
    fn remark_moves_item_to_most_recent() {
        let mut history = UsageHistory::new();
        history.mark_used("a.mp4");
        history.mark_used("b.mp4");
        history.mark_used("a.mp4");
        assert!(history.last_used("a.mp4") > history.last_used("b.mp4"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn serialization_roundtrip_keeps_clock() {
        let mut history = UsageHistory::new();
        history.mark_used("a.mp4");
        history.mark_used("b.mp4");
        let json = serde_json::to_string(&history).unwrap();
        let mut loaded: UsageHistory = serde_json::from_str(&json).unwrap();
        // New marks in the restored history must rank after old ones.
        loaded.mark_used("c.mp4");
        assert!(loaded.last_used("c.mp4") > loaded.last_used("b.mp4"));
    }
}
