use serde::{Deserialize, Serialize};

/// Phrases that open the dispute sub-report. The longer one is listed for
/// clarity even though the shorter one already matches it.
pub const DISPUTE_MARKERS: &[&str] = &[
    "LAPORAN TRANSAKSI DISPUTE INTERKONEKSI",
    "LAPORAN TRANSAKSI DISPUTE",
];

/// Field delimiter inside a raw row.
pub const ROW_DELIMITER: &str = "\t";

/// Whether a trimmed line is a dashed separator (`-----`).
pub fn is_separator(line: &str) -> bool {
    line.starts_with('-') && line.chars().all(|c| c == '-')
}

/// Whether a line announces the dispute sub-report.
pub fn is_dispute_marker(line: &str) -> bool {
    DISPUTE_MARKERS.iter().any(|marker| line.contains(marker))
}

/// A table line split on tabs. Positions carry no meaning until the row is
/// re-joined and sliced by character offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// The row text as it appeared in the source, tabs included.
    pub fn joined(&self) -> String {
        self.0.join(ROW_DELIMITER)
    }
}

impl From<&str> for RawRow {
    fn from(line: &str) -> Self {
        Self(line.split(ROW_DELIMITER).map(str::to_string).collect())
    }
}

/// Rows found between two separator lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table(Vec<RawRow>);

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: RawRow) {
        self.0.push(row);
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RawRow> for Table {
    fn from_iter<T: IntoIterator<Item = RawRow>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Table {
    type Item = RawRow;
    type IntoIter = std::vec::IntoIter<RawRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
