use super::dto::Record;
use super::types::{FieldSpec, Layout};
use crate::parsers::section::Table;

/// Substring by character offsets. Offsets past the end shorten the result
/// instead of failing.
fn slice_chars(text: &str, start: usize, end: Option<usize>) -> &str {
    let byte_at = |offset: usize| {
        text.char_indices()
            .nth(offset)
            .map_or(text.len(), |(idx, _)| idx)
    };
    let from = byte_at(start);
    let to = end.map_or(text.len(), |end| byte_at(end.max(start)));
    &text[from..to]
}

fn decode_field<'a>(row: &'a str, field: &FieldSpec) -> &'a str {
    slice_chars(row, field.start, field.end).trim()
}

/// Merge tables into one list of tab-joined row strings, dropping blank ones.
pub fn flatten_rows(tables: Vec<Table>) -> Vec<String> {
    tables
        .into_iter()
        .flatten()
        .map(|row| row.joined())
        .filter(|row| !row.trim().is_empty())
        .collect()
}

/// Slice a row against `layout`. Never fails: short rows give empty values.
pub fn decode_row(row: &str, layout: Layout) -> Record {
    let values = layout
        .fields()
        .iter()
        .map(|field| decode_field(row, field).to_string())
        .collect();
    Record::new(layout, values)
}

/// True when the `No.` column, ignoring spaces, is a non-empty run of digits.
pub fn is_data_row(record: &Record) -> bool {
    let index: String = record.index().chars().filter(|c| *c != ' ').collect();
    !index.is_empty() && index.chars().all(|c| c.is_ascii_digit())
}

pub struct FixedWidthParser;

impl FixedWidthParser {
    /// Decode flattened rows and keep the data rows, in source order.
    pub fn parse(rows: &[String], layout: Layout) -> Vec<Record> {
        let records: Vec<Record> = rows
            .iter()
            .map(|row| decode_row(row, layout))
            .filter(is_data_row)
            .collect();
        tracing::debug!(
            "Decoded {} of {} row(s) as {:?} records",
            records.len(),
            rows.len(),
            layout
        );
        records
    }
}
