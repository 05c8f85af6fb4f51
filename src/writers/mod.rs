//! Consumers that persist a [`RecordSet`] to disk.

mod csv;
mod json;
mod xlsx;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{errors::ReportResult, types::RecordSet};

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::xlsx::XlsxWriter;

pub trait RecordSetWriter {
    /// Write the whole set to `path`, replacing any existing file.
    fn write(&self, set: &RecordSet, path: &Path) -> ReportResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "xlsx")]
    Xlsx,
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "json")]
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn writer(&self) -> Box<dyn RecordSetWriter + Send + Sync> {
        match self {
            OutputFormat::Xlsx => Box::new(XlsxWriter::default()),
            OutputFormat::Csv => Box::new(CsvWriter),
            OutputFormat::Json => Box::new(JsonWriter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unsupported output format '{other}' (expected xlsx, csv or json)"
            )),
        }
    }
}
