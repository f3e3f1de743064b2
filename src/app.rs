//! One-shot generation workflow shared by the CLI and the HTTP surface:
//! scan, assemble, persist.

use crate::assembler::assemble;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::document::PlaylistDocument;
use crate::error::GridcastError;
use crate::scanner::scan_media;
use crate::selection::SelectionPolicy;
use crate::storage;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Result of a completed generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub document: PlaylistDocument,
    /// Where the playlist document was written.
    pub path: PathBuf,
}

/// Scan the configured media directory into a catalog.
pub fn scan_catalog(config: &AppConfig) -> Result<Catalog, GridcastError> {
    let items = scan_media(&config.video_directory, config.default_duration_secs);
    Catalog::from_items(items)
}

/// Generate and persist the playlist for one day.
///
/// Rotation state is loaded from the output directory before the run and
/// written back after, so consecutive days continue the rotation. The
/// document is written even when some slots are unfillable — the caller
/// decides whether a partial schedule is acceptable.
pub fn generate_for_date(
    config: &AppConfig,
    date: NaiveDate,
) -> Result<GenerationOutcome, GridcastError> {
    let catalog = scan_catalog(config)?;
    let template = config.template();
    let policy = SelectionPolicy::new(config.duration_tolerance);
    let mut history = storage::load_history(&config.output_directory);

    let document = assemble(&template, &catalog, &policy, &mut history, date)?;

    storage::save_history(&history, &config.output_directory)?;
    let path = storage::save_document(&document, &config.channel_name, &config.output_directory)?;

    tracing::info!(
        date = %date,
        entries = document.entries.len(),
        unfillable = document.unfillable.len(),
        "generation run complete"
    );

    Ok(GenerationOutcome { document, path })
}
