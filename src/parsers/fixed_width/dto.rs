use serde::ser::{Serialize, SerializeMap, Serializer};

use super::types::{INDEX_FIELD, Layout};

/// A decoded row: one trimmed value per column of its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    layout: Layout,
    values: Vec<String>,
}

impl Record {
    pub(crate) fn new(layout: Layout, values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), layout.fields().len());
        Self { layout, values }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.layout
            .position(name)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// The `No.` column.
    pub fn index(&self) -> &str {
        self.get(INDEX_FIELD).unwrap_or_default()
    }

    /// Values in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.layout
            .column_names()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
