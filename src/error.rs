use thiserror::Error;

/// Failures that abort a generation run or its surrounding I/O.
///
/// Per-slot selection misses are deliberately NOT here — they surface as
/// `UnfillableSlot` records on the document and the run continues.
#[derive(Debug, Error)]
pub enum GridcastError {
    /// The template is structurally unusable: unordered or overlapping
    /// slots, non-positive durations, or a slot wrapping past midnight.
    /// Rejected before assembly begins.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// A media record failed boundary validation (e.g. non-positive
    /// duration). Rejected when the catalog is built.
    #[error("invalid media record: {0}")]
    InvalidMedia(String),

    /// The assembled document failed its own self-check. Indicates a
    /// policy or assembler bug, never bad input.
    #[error("assembly invariant violation: {0}")]
    AssemblyInvariantViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
