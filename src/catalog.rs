use crate::error::GridcastError;
use crate::media::MediaItem;
use serde::Serialize;

/// One category's worth of media, in scan order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub category: String,
    pub items: Vec<MediaItem>,
}

/// The full inventory of available media, grouped by category.
///
/// Bucket order and item order within a bucket follow insertion (scan)
/// order; selection tie-breaks depend on this. Read-only during a
/// generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    buckets: Vec<CategoryBucket>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            buckets: Vec::new(),
        }
    }

    /// Add an item to its category bucket, creating the bucket if needed.
    /// Rejects items with a non-positive duration at the boundary rather
    /// than letting them fail deep inside selection.
    pub fn insert(&mut self, item: MediaItem) -> Result<(), GridcastError> {
        if !(item.duration_secs > 0.0) {
            return Err(GridcastError::InvalidMedia(format!(
                "'{}' has non-positive duration {}",
                item.id, item.duration_secs
            )));
        }
        match self
            .buckets
            .iter_mut()
            .find(|b| b.category == item.category)
        {
            Some(bucket) => bucket.items.push(item),
            None => self.buckets.push(CategoryBucket {
                category: item.category.clone(),
                items: vec![item],
            }),
        }
        Ok(())
    }

    /// Build a catalog from scanned items, validating each at the boundary.
    pub fn from_items(
        items: impl IntoIterator<Item = MediaItem>,
    ) -> Result<Self, GridcastError> {
        let mut catalog = Catalog::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Items available for a category, in scan order.
    /// `None` when the template references a category the scan never saw.
    pub fn items_for(&self, category: &str) -> Option<&[MediaItem]> {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.items.as_slice())
    }

    /// Whether a category has no usable items (absent counts as empty).
    pub fn is_empty(&self, category: &str) -> bool {
        self.items_for(category).map_or(true, |items| items.is_empty())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.category.as_str())
    }

    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    /// Total item count across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.items.len()).sum()
    }

    pub fn is_empty_catalog(&self) -> bool {
        self.len() == 0
    }
}
