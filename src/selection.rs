use crate::catalog::Catalog;
use crate::history::UsageHistory;
use crate::media::MediaItem;
use std::cmp::Ordering;

/// Default over-run tolerance: an item may exceed the slot target by 5%
/// before it loses its duration-fit preference.
pub const DEFAULT_DURATION_TOLERANCE: f64 = 0.05;

/// Chooses which catalog item fills a slot.
///
/// Ranking, in order:
/// 1. Recency — least-recently-used first. Items never selected rank
///    before everything else; ties fall back to catalog insertion order.
/// 2. Duration fit — among items of equal recency, prefer the duration
///    closest to the slot target without exceeding it by more than
///    `tolerance`; when nothing fits the tolerance, closest absolute
///    match wins.
#[derive(Debug, Clone, Copy)]
pub struct SelectionPolicy {
    /// Fractional over-run allowance relative to the slot target.
    pub tolerance: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy {
            tolerance: DEFAULT_DURATION_TOLERANCE,
        }
    }
}

impl SelectionPolicy {
    pub fn new(tolerance: f64) -> Self {
        SelectionPolicy { tolerance }
    }

    /// Pick the best item for `category` at `target_duration_secs`, and
    /// record it in the history so the next slot sees updated recency.
    ///
    /// `None` when the category is absent from the catalog or its bucket
    /// is empty — the caller marks the slot unfillable and moves on.
    pub fn select<'a>(
        &self,
        catalog: &'a Catalog,
        category: &str,
        target_duration_secs: f64,
        history: &mut UsageHistory,
    ) -> Option<&'a MediaItem> {
        let candidates = catalog.items_for(category)?;

        let chosen = candidates
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| {
                self.rank(a, *ia, target_duration_secs, history)
                    .cmp_with(&self.rank(b, *ib, target_duration_secs, history))
            })
            .map(|(_, item)| item)?;

        history.mark_used(&chosen.id);
        Some(chosen)
    }

    /// Whether an item's duration overruns the target beyond tolerance.
    pub fn exceeds_tolerance(&self, duration_secs: f64, target_duration_secs: f64) -> bool {
        duration_secs > target_duration_secs * (1.0 + self.tolerance)
    }

    fn rank(&self, item: &MediaItem, index: usize, target: f64, history: &UsageHistory) -> Rank {
        // Never-used maps below every real tick so fresh items go first.
        let recency = history.last_used(&item.id).map(|t| t + 1).unwrap_or(0);
        let over_tolerance = self.exceeds_tolerance(item.duration_secs, target);
        Rank {
            recency,
            over_tolerance,
            distance: (item.duration_secs - target).abs(),
            index,
        }
    }
}

/// Sort key for one candidate; lower wins.
struct Rank {
    recency: u64,
    over_tolerance: bool,
    distance: f64,
    index: usize,
}

impl Rank {
    fn cmp_with(&self, other: &Rank) -> Ordering {
        self.recency
            .cmp(&other.recency)
            .then(self.over_tolerance.cmp(&other.over_tolerance))
            .then(
                self.distance
                    .partial_cmp(&other.distance)
                    .unwrap_or(Ordering::Equal),
            )
            .then(self.index.cmp(&other.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(items: &[(&str, &str, f64)]) -> Catalog {
        Catalog::from_items(
            items
                .iter()
                .map(|(path, cat, dur)| MediaItem::new(*path, *cat, *dur)),
        )
        .unwrap()
    }

    #[test]
    fn missing_category_yields_none() {
        let cat = catalog(&[("a.mp4", "news", 300.0)]);
        let mut history = UsageHistory::new();
        let policy = SelectionPolicy::default();
        assert!(policy.select(&cat, "sports", 300.0, &mut history).is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn unused_item_beats_recently_used() {
        let cat = catalog(&[("a.mp4", "news", 300.0), ("b.mp4", "news", 300.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        history.mark_used("a.mp4");
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "b.mp4");
    }

    #[test]
    fn least_recently_used_wins_among_used() {
        let cat = catalog(&[("a.mp4", "news", 300.0), ("b.mp4", "news", 300.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        history.mark_used("a.mp4");
        history.mark_used("b.mp4");
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "a.mp4");
    }

    #[test]
    fn insertion_order_breaks_recency_ties() {
        let cat = catalog(&[("first.mp4", "news", 300.0), ("second.mp4", "news", 300.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "first.mp4");
    }

    #[test]
    fn duration_fit_breaks_ties_within_unused_group() {
        // 290 is within 5% of 300; 500 is not. Both unused.
        let cat = catalog(&[("long.mp4", "news", 500.0), ("fit.mp4", "news", 290.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "fit.mp4");
    }

    #[test]
    fn within_tolerance_beats_closer_overrun() {
        // 310 exceeds 300 by ~3.3% (within 5% tolerance); 316 exceeds it.
        // 250 undershoots but never overruns, so it is within tolerance;
        // 310 is closer to target and also within tolerance, so it wins.
        let cat = catalog(&[
            ("over.mp4", "news", 316.0),
            ("short.mp4", "news", 250.0),
            ("near.mp4", "news", 310.0),
        ]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "near.mp4");
    }

    #[test]
    fn falls_back_to_closest_absolute_when_none_fit() {
        // Everything overruns beyond tolerance; closest absolute wins.
        let cat = catalog(&[("a.mp4", "news", 900.0), ("b.mp4", "news", 400.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "b.mp4");
    }

    #[test]
    fn recency_outranks_duration_fit() {
        // perfect.mp4 fits exactly but was just used; the stale long item
        // must win anyway — rotation takes precedence over fit.
        let cat = catalog(&[("perfect.mp4", "news", 300.0), ("long.mp4", "news", 900.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        history.mark_used("perfect.mp4");
        let chosen = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(chosen.id, "long.mp4");
    }

    #[test]
    fn selection_updates_history() {
        let cat = catalog(&[("a.mp4", "news", 300.0), ("b.mp4", "news", 300.0)]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let first = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        let second = policy.select(&cat, "news", 300.0, &mut history).unwrap();
        assert_eq!(first.id, "a.mp4");
        assert_eq!(second.id, "b.mp4");
        assert!(history.last_used("b.mp4") > history.last_used("a.mp4"));
    }

    #[test]
    fn rotation_cycles_through_whole_bucket() {
        let cat = catalog(&[
            ("a.mp4", "news", 300.0),
            ("b.mp4", "news", 300.0),
            ("c.mp4", "news", 300.0),
        ]);
        let policy = SelectionPolicy::default();
        let mut history = UsageHistory::new();
        let mut picks = Vec::new();
        for _ in 0..6 {
            picks.push(policy.select(&cat, "news", 300.0, &mut history).unwrap().id.clone());
        }
        assert_eq!(picks, ["a.mp4", "b.mp4", "c.mp4", "a.mp4", "b.mp4", "c.mp4"]);
    }

    #[test]
    fn exceeds_tolerance_boundary() {
        let policy = SelectionPolicy::new(0.05);
        assert!(!policy.exceeds_tolerance(315.0, 300.0)); // exactly 5%
        assert!(policy.exceeds_tolerance(316.0, 300.0));
        assert!(!policy.exceeds_tolerance(100.0, 300.0)); // undershoot never overruns
    }
}
