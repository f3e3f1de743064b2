//! Filesystem discovery of playable media.
//!
//! One first-level sub-directory per category; files sort lexicographically
//! within each category so scan order is deterministic. Durations are
//! assigned from configuration — the engine trusts supplied metadata and
//! never opens the files themselves.

use crate::media::{MediaItem, is_video_file};
use std::path::Path;
use walkdir::WalkDir;

/// Walk `root` and return the discovered items in scan order.
///
/// Files sitting directly in `root` have no category and are skipped.
/// An absent or empty root simply yields nothing; the resulting catalog
/// will mark every slot unfillable, which is the honest outcome.
pub fn scan_media(root: &Path, default_duration_secs: f64) -> Vec<MediaItem> {
    let mut items = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }
        let Some(category) = entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
        else {
            continue;
        };
        items.push(MediaItem::new(entry.path(), category, default_duration_secs));
    }

    tracing::debug!(count = items.len(), root = %root.display(), "media scan complete");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn discovers_files_grouped_by_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("news/a.mp4"));
        touch(&dir.path().join("news/b.mkv"));
        touch(&dir.path().join("music/song.mov"));

        let items = scan_media(dir.path(), 900.0);
        assert_eq!(items.len(), 3);
        let news: Vec<_> = items.iter().filter(|i| i.category == "news").collect();
        assert_eq!(news.len(), 2);
        assert!(items.iter().all(|i| i.duration_secs == 900.0));
    }

    #[test]
    fn scan_order_is_sorted_within_category() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("news/c.mp4"));
        touch(&dir.path().join("news/a.mp4"));
        touch(&dir.path().join("news/b.mp4"));

        let items = scan_media(dir.path(), 900.0);
        let names: Vec<String> = items.iter().map(|i| i.file_name()).collect();
        assert_eq!(names, ["a.mp4", "b.mp4", "c.mp4"]);
    }

    #[test]
    fn ignores_non_video_and_root_level_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("news/a.mp4"));
        touch(&dir.path().join("news/readme.txt"));
        touch(&dir.path().join("stray.mp4")); // no category
        let items = scan_media(dir.path(), 900.0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].file_name(), "a.mp4");
    }

    #[test]
    fn missing_root_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(scan_media(&gone, 900.0).is_empty());
    }

    #[test]
    fn nested_files_keep_first_level_category() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("series/season1/e01.mp4"));
        let items = scan_media(dir.path(), 900.0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "series");
    }
}
