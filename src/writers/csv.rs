use std::path::Path;

use super::RecordSetWriter;
use crate::{
    errors::{ReportError, ReportResult},
    types::RecordSet,
};

/// Header row of column names followed by one line per record.
pub struct CsvWriter;

impl CsvWriter {
    fn write_all(set: &RecordSet, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(set.column_names())?;
        for record in set {
            writer.write_record(record.values())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl RecordSetWriter for CsvWriter {
    fn write(&self, set: &RecordSet, path: &Path) -> ReportResult<()> {
        Self::write_all(set, path).map_err(|e| ReportError::write_failure(path, e))?;
        tracing::info!("Wrote {} row(s) to {}", set.len(), path.display());
        Ok(())
    }
}
