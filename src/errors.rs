use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures surfaced while turning a transaction report into a record set.
///
/// Anomalies inside the report itself (short rows, stray header lines, empty
/// tables) never show up here; they are trimmed or dropped by the parsers.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The source could not be opened or is not valid UTF-8 text
    #[error("Cannot read {} as text: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// The main pass did not find a single table row before the dispute marker
    #[error("No table rows found in the report")]
    NoInputRows,

    /// The dispute pass found no qualifying table after the dispute marker
    #[error("No data found in the dispute section")]
    NoDisputeData,

    /// The destination file could not be written
    #[error("Failed to write {}: {reason}", .path.display())]
    OutputWriteFailure { path: PathBuf, reason: String },

    // ── Job boundary ────────────────────────────────────────────────────────────

    /// Anything else, caught where a job hands its result back to the host
    #[error("Transformation failed: {0}")]
    Unexpected(String),
}

impl ReportError {
    pub(crate) fn unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_failure(path: &Path, reason: impl ToString) -> Self {
        Self::OutputWriteFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// True for the "nothing to export" conditions, which hosts report as a
    /// notice rather than a processing failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoInputRows | Self::NoDisputeData)
    }
}

/// Convenience alias for results carrying a [`ReportError`]
pub type ReportResult<T> = Result<T, ReportError>;
