//! One "extract and export" invocation, runnable inline or on a worker thread.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use serde::Serialize;

use crate::{
    builder::{ReportBuilder, ReportMode},
    errors::{ReportError, ReportResult},
    writers::OutputFormat,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    pub input: PathBuf,
    pub mode: ReportMode,
    pub format: OutputFormat,
    /// Explicit destination; derived from `input` and `mode` when absent.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub output: PathBuf,
    pub records: usize,
}

impl ExtractionJob {
    pub fn new(input: impl Into<PathBuf>, mode: ReportMode) -> Self {
        Self {
            input: input.into(),
            mode,
            format: OutputFormat::default(),
            output: None,
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.mode.output_path(&self.input, self.format.extension()))
    }

    /// Read, extract and write. Nothing is written when extraction fails.
    pub fn run(&self) -> ReportResult<JobOutcome> {
        tracing::info!("{:?} extraction of {}", self.mode, self.input.display());
        let set = ReportBuilder::new()
            .filename(&self.input)
            .mode(self.mode)
            .extract()?;

        let output = self.output_path();
        self.format.writer().write(&set, &output)?;
        Ok(JobOutcome {
            output,
            records: set.len(),
        })
    }

    /// Run on a worker thread and hand the result to `on_done` there. A panic
    /// inside the job comes back as [`ReportError::Unexpected`].
    pub fn spawn<F>(self, on_done: F) -> JoinHandle<()>
    where
        F: FnOnce(ReportResult<JobOutcome>) + Send + 'static,
    {
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| self.run()))
                .unwrap_or_else(|payload| Err(ReportError::Unexpected(panic_message(payload))));
            on_done(result);
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker panicked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;

    const REPORT: &str = "\
-----
0000001TRX01    01/02/2024
0000002TRX02    01/02/2024
-----
LAPORAN TRANSAKSI DISPUTE
-----
0000001DSP01    01/02/2024
-----
-----
TRAILER
-----
";

    #[test]
    fn test_run_main_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        fs::write(&input, REPORT).unwrap();

        let outcome = ExtractionJob::new(&input, ReportMode::Main)
            .format(OutputFormat::Csv)
            .run()
            .unwrap();

        assert_eq!(outcome.output, dir.path().join("report.csv"));
        assert_eq!(outcome.records, 2);
        assert!(outcome.output.exists());
    }

    #[test]
    fn test_run_dispute_uses_prefixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        fs::write(&input, REPORT).unwrap();

        let outcome = ExtractionJob::new(&input, ReportMode::Dispute).run().unwrap();

        assert_eq!(outcome.output, dir.path().join("DISPUTE_report.xlsx"));
        assert_eq!(outcome.records, 1);
    }

    #[test]
    fn test_run_no_dispute_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        fs::write(&input, "-----\n0000001 A\n-----\n").unwrap();

        let job = ExtractionJob::new(&input, ReportMode::Dispute);
        let result = job.run();

        assert!(matches!(result, Err(ReportError::NoDisputeData)));
        assert!(!job.output_path().exists());
    }

    #[test]
    fn test_explicit_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        let target = dir.path().join("custom.json");
        fs::write(&input, REPORT).unwrap();

        let outcome = ExtractionJob::new(&input, ReportMode::Main)
            .format(OutputFormat::Json)
            .output(&target)
            .run()
            .unwrap();

        assert_eq!(outcome.output, target);
        assert!(target.exists());
    }

    #[test]
    fn test_spawn_delivers_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        fs::write(&input, REPORT).unwrap();

        let (tx, rx) = mpsc::channel();
        ExtractionJob::new(&input, ReportMode::Main)
            .spawn(move |result| tx.send(result).unwrap())
            .join()
            .unwrap();

        let outcome = rx.recv().unwrap().unwrap();
        assert_eq!(outcome.records, 2);
    }

    #[test]
    fn test_spawn_reports_unreadable_input() {
        let (tx, rx) = mpsc::channel();
        ExtractionJob::new("/definitely/not/here.txt", ReportMode::Main)
            .spawn(move |result| tx.send(result).unwrap())
            .join()
            .unwrap();

        assert!(matches!(
            rx.recv().unwrap(),
            Err(ReportError::InputUnreadable { .. })
        ));
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new("bang".to_string())), "bang");
        assert_eq!(panic_message(Box::new(42)), "worker panicked");
    }
}
