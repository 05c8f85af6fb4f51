use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::RecordSetWriter;
use crate::{
    errors::{ReportError, ReportResult},
    types::RecordSet,
};

/// Pretty-printed array of objects, keys in column order.
pub struct JsonWriter;

impl RecordSetWriter for JsonWriter {
    fn write(&self, set: &RecordSet, path: &Path) -> ReportResult<()> {
        let file = File::create(path).map_err(|e| ReportError::write_failure(path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, set)
            .map_err(|e| ReportError::write_failure(path, e))?;
        out.flush().map_err(|e| ReportError::write_failure(path, e))?;
        tracing::info!("Wrote {} row(s) to {}", set.len(), path.display());
        Ok(())
    }
}
