use super::types::{RawRow, Table, is_dispute_marker, is_separator};
use crate::parsers::traits::SectionExtractor;

/// Where the scan is relative to the dashed separators.
#[derive(Debug)]
enum TableState {
    OutsideTable,
    InsideTable(Table),
}

/// Fold accumulator: the current state plus every table closed so far.
#[derive(Debug)]
struct TableScan {
    state: TableState,
    tables: Vec<Table>,
}

impl Default for TableScan {
    fn default() -> Self {
        Self {
            state: TableState::OutsideTable,
            tables: Vec::new(),
        }
    }
}

impl TableScan {
    fn step(mut self, line: &str) -> Self {
        self.state = match (self.state, is_separator(line)) {
            // separators toggle rather than open/close explicitly
            (TableState::InsideTable(table), true) => {
                self.tables.extend(Some(table).filter(|t| !t.is_empty()));
                TableState::OutsideTable
            }
            (TableState::OutsideTable, true) => TableState::InsideTable(Table::new()),
            (TableState::InsideTable(mut table), false) => {
                if !line.is_empty() {
                    table.push(RawRow::from(line));
                }
                TableState::InsideTable(table)
            }
            (TableState::OutsideTable, false) => TableState::OutsideTable,
        };
        self
    }

    fn finish(mut self) -> Vec<Table> {
        if let TableState::InsideTable(table) = self.state {
            if !table.is_empty() {
                self.tables.push(table);
            }
        }
        self.tables
    }
}

/// Split trimmed lines into tables. Lines outside a separator pair are ignored.
pub fn scan_tables<'a, I>(lines: I) -> Vec<Table>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .fold(TableScan::default(), TableScan::step)
        .finish()
}

/// Everything before the dispute marker. The first marker ends the pass.
pub struct MainSectionExtractor;

impl SectionExtractor for MainSectionExtractor {
    fn extract<I, S>(lines: I) -> Vec<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let tables = scan_tables(
            lines
                .iter()
                .map(|line| line.as_ref().trim())
                .take_while(|line| !is_dispute_marker(line)),
        );
        tracing::debug!("Main section: {} table(s) before the dispute marker", tables.len());
        tables
    }

    fn is_supported(_content: &str) -> bool {
        true
    }
}

/// Tables after the dispute marker, minus the trailing one.
pub struct DisputeSectionExtractor;

impl DisputeSectionExtractor {
    /// The dispute sub-report always ends with one artifact table, so the last
    /// table is dropped and a lone table counts as no data at all.
    fn discard_trailing(mut tables: Vec<Table>) -> Vec<Table> {
        if tables.len() > 1 {
            tables.pop();
            tables
        } else {
            Vec::new()
        }
    }
}

impl SectionExtractor for DisputeSectionExtractor {
    fn extract<I, S>(lines: I) -> Vec<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let found = scan_tables(
            lines
                .iter()
                .map(|line| line.as_ref().trim())
                .skip_while(|line| !is_dispute_marker(line))
                .filter(|line| !is_dispute_marker(line)),
        );
        tracing::debug!("Dispute section: {} table(s) after the marker", found.len());
        Self::discard_trailing(found)
    }

    fn is_supported(content: &str) -> bool {
        content.lines().any(is_dispute_marker)
    }
}
