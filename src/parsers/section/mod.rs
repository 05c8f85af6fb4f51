mod parser;
mod types;

pub use parser::{DisputeSectionExtractor, MainSectionExtractor, scan_tables};
pub use types::{DISPUTE_MARKERS, RawRow, Table, is_dispute_marker, is_separator};
