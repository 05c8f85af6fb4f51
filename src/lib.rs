//! Extract fixed-width interconnection transaction reports into spreadsheets.
//!
//! A report holds transaction tables framed by dashed separator lines, and may
//! carry a dispute sub-report after a `LAPORAN TRANSAKSI DISPUTE` banner. The
//! main pass reads every table before that banner with the 21-column layout;
//! the dispute pass reads the tables after it with the 26-column layout.
//!
//! ```rust,ignore
//! use trx_report::{ReportBuilder, ReportMode};
//!
//! let records = ReportBuilder::new()
//!     .filename("report.txt")
//!     .mode(ReportMode::Dispute)
//!     .extract()?;
//! ```

mod builder;
mod types;

pub mod errors;
pub mod job;
pub mod parsers;
pub mod writers;

pub use builder::{DISPUTE_OUTPUT_PREFIX, Inspection, ReportBuilder, ReportMode, read_report};
pub use errors::{ReportError, ReportResult};
pub use job::{ExtractionJob, JobOutcome};
pub use parsers::prelude::*;
pub use types::RecordSet;
pub use writers::{OutputFormat, RecordSetWriter};
