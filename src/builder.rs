use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    errors::{ReportError, ReportResult},
    parsers::fixed_width::flatten_rows,
    parsers::prelude::*,
    types::RecordSet,
};
use serde::{Deserialize, Serialize};

/// Prefix given to dispute exports, placed next to the input.
pub const DISPUTE_OUTPUT_PREFIX: &str = "DISPUTE_";

/// Which part of the report a run extracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportMode {
    /// Transaction tables before the dispute marker
    #[default]
    #[serde(rename = "main")]
    Main,
    /// Tables of the dispute sub-report
    #[serde(rename = "dispute")]
    Dispute,
}

impl ReportMode {
    pub fn layout(&self) -> Layout {
        match self {
            ReportMode::Main => Layout::Standard,
            ReportMode::Dispute => Layout::Dispute,
        }
    }

    fn tables(&self, content: &str) -> Vec<Table> {
        match self {
            ReportMode::Main => MainSectionExtractor::extract(content.lines()),
            ReportMode::Dispute => DisputeSectionExtractor::extract(content.lines()),
        }
    }

    /// Run the whole pipeline over in-memory report text.
    pub fn parse(&self, content: &str) -> ReportResult<RecordSet> {
        let tables = self.tables(content);
        if *self == ReportMode::Dispute && tables.is_empty() {
            tracing::warn!("No qualifying table after the dispute marker");
            return Err(ReportError::NoDisputeData);
        }

        let rows = flatten_rows(tables);
        if *self == ReportMode::Main && rows.is_empty() {
            tracing::warn!("No table rows before the dispute marker");
            return Err(ReportError::NoInputRows);
        }

        let layout = self.layout();
        Ok(RecordSet::new(layout, FixedWidthParser::parse(&rows, layout)))
    }

    /// Where the export for `input` goes, given the file extension to use.
    ///
    /// Main exports replace the input's extension; dispute exports sit in the
    /// same directory with [`DISPUTE_OUTPUT_PREFIX`] in front of the stem.
    pub fn output_path(&self, input: &Path, extension: &str) -> PathBuf {
        match self {
            ReportMode::Main => input.with_extension(extension),
            ReportMode::Dispute => {
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                input.with_file_name(format!("{DISPUTE_OUTPUT_PREFIX}{stem}.{extension}"))
            }
        }
    }
}

/// Table and row counts of both passes, without decoding anything to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub main_tables: usize,
    pub main_records: usize,
    pub has_dispute_section: bool,
    pub dispute_tables: usize,
    pub dispute_records: usize,
}

impl Inspection {
    fn of(content: &str) -> Self {
        let count = |mode: ReportMode| {
            let tables = mode.tables(content);
            let table_count = tables.len();
            let rows = flatten_rows(tables);
            (table_count, FixedWidthParser::parse(&rows, mode.layout()).len())
        };
        let (main_tables, main_records) = count(ReportMode::Main);
        let (dispute_tables, dispute_records) = count(ReportMode::Dispute);

        Self {
            main_tables,
            main_records,
            has_dispute_section: DisputeSectionExtractor::is_supported(content),
            dispute_tables,
            dispute_records,
        }
    }
}

#[derive(Default)]
pub struct ReportBuilder {
    content: Option<String>,
    filepath: Option<PathBuf>,
    mode: ReportMode,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filepath = Some(filename.as_ref().to_path_buf());
        self
    }

    pub fn mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    fn load(self) -> ReportResult<(ReportMode, String)> {
        let content = match (self.content, self.filepath) {
            (Some(content), _) => content,
            (None, Some(path)) => read_report(&path)?,
            (None, None) => return Err(ReportError::MissingContentAndFilepath),
        };
        Ok((self.mode, content))
    }

    pub fn extract(self) -> ReportResult<RecordSet> {
        let (mode, content) = self.load()?;
        let set = mode.parse(&content)?;
        tracing::debug!("{:?} extraction produced {} record(s)", mode, set.len());
        Ok(set)
    }

    pub fn inspect(self) -> ReportResult<Inspection> {
        let (_, content) = self.load()?;
        Ok(Inspection::of(&content))
    }
}

/// Read a report as UTF-8 text.
pub fn read_report(path: &Path) -> ReportResult<String> {
    fs::read_to_string(path).map_err(|e| ReportError::unreadable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn data_line(index: &str, tag: &str, width: usize) -> String {
        format!("{:<7}{:<width$}", index, tag, width = width - 7)
    }

    /// The two-pass sample: one main table, then two dispute tables where the
    /// second is the trailing artifact.
    fn two_pass_report() -> String {
        [
            "-----".to_string(),
            data_line("0000001", "DATA", 270),
            "-----".to_string(),
            "LAPORAN TRANSAKSI DISPUTE".to_string(),
            "-----".to_string(),
            data_line("0000001", "DISPUTE", 374),
            "-----".to_string(),
            "-----".to_string(),
            data_line("0000002", "DISPUTE", 374),
            "-----".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn test_two_pass_report() {
        let content = two_pass_report();

        let main = ReportBuilder::new().content(&content).extract().unwrap();
        assert_eq!(main.len(), 1);
        assert_eq!(main.layout(), Layout::Standard);
        assert_eq!(main.records()[0].get("Trx_Code"), Some("DATA"));

        let dispute = ReportBuilder::new()
            .content(&content)
            .mode(ReportMode::Dispute)
            .extract()
            .unwrap();
        assert_eq!(dispute.len(), 1);
        assert_eq!(dispute.layout(), Layout::Dispute);
        assert_eq!(dispute.records()[0].index(), "0000001");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let content = two_pass_report();
        for mode in [ReportMode::Main, ReportMode::Dispute] {
            let first = mode.parse(&content).unwrap();
            let second = mode.parse(&content).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[rstest]
    #[case("-----\n0000001 DATA\n-----\n")]
    #[case("")]
    #[case("LAPORAN TRANSAKSI DISPUTE\n-----\n0000001 D\n-----\n")]
    fn test_dispute_without_data(#[case] content: &str) {
        let result = ReportMode::Dispute.parse(content);
        assert!(matches!(result, Err(ReportError::NoDisputeData)));
    }

    #[rstest]
    #[case("")]
    #[case("HEADER ONLY\nno separators at all\n")]
    #[case("LAPORAN TRANSAKSI DISPUTE\n-----\n0000001 D\n-----\n")]
    #[case("-----\n\n-----\n")]
    fn test_main_without_rows(#[case] content: &str) {
        let result = ReportMode::Main.parse(content);
        assert!(matches!(result, Err(ReportError::NoInputRows)));
    }

    #[test]
    fn test_main_with_only_header_rows_is_empty_set() {
        let set = ReportMode::Main
            .parse("-----\nNo.    TRX CODE\nTOTAL\n-----\n")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_main_count_bounded_by_content_lines() {
        let content = "x\n-----\nNo. HEADER\n0000001 A\n\n0000002 B\n-----\nfooter\n0000003 C\n";
        let set = ReportMode::Main.parse(content).unwrap();
        let candidate_lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('-'))
            .count();
        assert_eq!(set.len(), 2);
        assert!(set.len() <= candidate_lines);
    }

    #[test]
    fn test_dispute_discards_second_of_two_tables() {
        let content = "LAPORAN TRANSAKSI DISPUTE INTERKONEKSI\n\
                       -----\n0000001 D\n0000002 D\n-----\n\
                       -----\n0000003 D\n-----\n";
        let set = ReportMode::Dispute.parse(content).unwrap();
        let indexes: Vec<_> = set.iter().map(Record::index).collect();
        assert_eq!(indexes, ["0000001", "0000002"]);
    }

    #[rstest]
    #[case(ReportMode::Main, "/data/in/report.txt", "xlsx", "/data/in/report.xlsx")]
    #[case(ReportMode::Main, "/data/in/report", "csv", "/data/in/report.csv")]
    #[case(ReportMode::Dispute, "/data/in/report.txt", "xlsx", "/data/in/DISPUTE_report.xlsx")]
    #[case(ReportMode::Dispute, "report.v2.txt", "json", "DISPUTE_report.v2.json")]
    fn test_output_path(
        #[case] mode: ReportMode,
        #[case] input: &str,
        #[case] extension: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(mode.output_path(Path::new(input), extension), PathBuf::from(expected));
    }

    #[test]
    fn test_builder_missing_content() {
        let result = ReportBuilder::new().extract();
        assert!(matches!(result, Err(ReportError::MissingContentAndFilepath)));
    }

    #[test]
    fn test_builder_defaults_to_main() {
        let builder = ReportBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert_eq!(builder.mode, ReportMode::Main);
    }

    #[test]
    fn test_builder_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", two_pass_report()).unwrap();

        let set = ReportBuilder::new()
            .filename(file.path())
            .mode(ReportMode::Dispute)
            .extract()
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_builder_missing_file_is_unreadable() {
        let result = ReportBuilder::new()
            .filename("/definitely/not/here/report.txt")
            .extract();
        assert!(matches!(result, Err(ReportError::InputUnreadable { .. })));
    }

    #[test]
    fn test_builder_non_utf8_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x2d, 0x2d, 0x0a, 0xff, 0xfe, 0x0a]).unwrap();

        let result = ReportBuilder::new().filename(file.path()).extract();
        assert!(matches!(result, Err(ReportError::InputUnreadable { .. })));
    }

    #[test]
    fn test_inspect_counts_both_passes() {
        let inspection = ReportBuilder::new()
            .content(&two_pass_report())
            .inspect()
            .unwrap();
        assert_eq!(
            inspection,
            Inspection {
                main_tables: 1,
                main_records: 1,
                has_dispute_section: true,
                dispute_tables: 1,
                dispute_records: 1,
            }
        );
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&ReportMode::Dispute).unwrap();
        assert_eq!(json, "\"dispute\"");
        let back: ReportMode = serde_json::from_str("\"main\"").unwrap();
        assert_eq!(back, ReportMode::Main);
    }
}
