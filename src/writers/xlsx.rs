use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::RecordSetWriter;
use crate::{
    errors::{ReportError, ReportResult},
    types::RecordSet,
};

/// Single worksheet: bold header row, then one text cell per value.
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    sheet_name: String,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl XlsxWriter {
    #[cfg(test)]
    pub(crate) fn with_sheet_name(sheet_name: &str) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
        }
    }

    fn build(&self, set: &RecordSet) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, name) in (0u16..).zip(set.column_names()) {
            sheet.write_string_with_format(0, col, name, &header)?;
        }
        for (row, record) in (1u32..).zip(set.iter()) {
            for (col, value) in (0u16..).zip(record.values()) {
                sheet.write_string(row, col, value)?;
            }
        }
        Ok(workbook)
    }
}

impl RecordSetWriter for XlsxWriter {
    fn write(&self, set: &RecordSet, path: &Path) -> ReportResult<()> {
        let mut workbook = self
            .build(set)
            .map_err(|e| ReportError::write_failure(path, e))?;
        workbook
            .save(path)
            .map_err(|e| ReportError::write_failure(path, e))?;
        tracing::info!("Wrote {} row(s) to {}", set.len(), path.display());
        Ok(())
    }
}
