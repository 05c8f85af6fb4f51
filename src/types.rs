use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::parsers::prelude::*;

/// The exported unit of one run: decoded data rows sharing one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    layout: Layout,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(layout: Layout, records: Vec<Record>) -> Self {
        debug_assert!(records.iter().all(|r| r.layout() == layout));
        Self { layout, records }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header row for tabular output.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.layout.column_names().collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for RecordSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}
