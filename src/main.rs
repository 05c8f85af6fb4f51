mod logging;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use clap::{Args, Parser, Subcommand};
use trx_report::{
    ExtractionJob, JobOutcome, OutputFormat, ReportBuilder, ReportMode, ReportResult,
};

/// Convert fixed-width transaction reports into spreadsheets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the transaction tables that precede the dispute section
    Main(ExtractArgs),
    /// Export the dispute sub-report
    Dispute(ExtractArgs),
    /// Check that a report reads as text and count its tables and records
    Inspect {
        /// Report file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Report files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: xlsx, csv or json
    #[arg(short, long, default_value = "xlsx")]
    format: OutputFormat,

    /// Destination file (only with a single input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);
    tracing::debug!("Parsed arguments: {:?}", cli);

    match cli.command {
        Command::Main(args) => run_extract(ReportMode::Main, args),
        Command::Dispute(args) => run_extract(ReportMode::Dispute, args),
        Command::Inspect { file } => run_inspect(&file),
    }
}

/// Same file named twice (or via different relative paths) runs once.
fn distinct_inputs(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|file| seen.insert(fs::canonicalize(file).unwrap_or_else(|_| file.clone())))
        .collect()
}

/// Absolute form of a path that may not exist yet: the parent is resolved
/// and the file name appended.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// One job per distinct input. Fails when two jobs would write the same
/// file, or a job would overwrite any of the inputs.
fn plan_jobs(mode: ReportMode, args: ExtractArgs) -> Result<Vec<ExtractionJob>, String> {
    let files = distinct_inputs(args.files);
    if args.output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".to_string());
    }

    let inputs: HashSet<PathBuf> = files.iter().map(|file| resolved(file)).collect();
    let mut outputs = HashSet::new();
    let mut jobs = Vec::with_capacity(files.len());
    for file in files {
        let mut job = ExtractionJob::new(file, mode).format(args.format);
        if let Some(output) = &args.output {
            job = job.output(output);
        }
        let output = resolved(&job.output_path());
        if inputs.contains(&output) {
            return Err(format!("{} would overwrite an input file", output.display()));
        }
        if !outputs.insert(output.clone()) {
            return Err(format!("{} is the output of more than one input file", output.display()));
        }
        jobs.push(job);
    }
    Ok(jobs)
}

fn run_extract(mode: ReportMode, args: ExtractArgs) -> ExitCode {
    let jobs = match plan_jobs(mode, args) {
        Ok(jobs) => jobs,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(2);
        }
    };

    let (tx, rx) = mpsc::channel::<(PathBuf, ReportResult<JobOutcome>)>();
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let file = job.input.clone();
            let tx = tx.clone();
            job.spawn(move |result| {
                // receiver outlives every worker
                let _ = tx.send((file, result));
            })
        })
        .collect();
    drop(tx);

    let mut failures = 0;
    for (file, result) in rx {
        match result {
            Ok(outcome) => println!(
                "Saved {} ({} record(s))",
                outcome.output.display(),
                outcome.records
            ),
            Err(e) if e.is_no_data() => {
                tracing::warn!("{}: {}", file.display(), e);
                println!("{}: {}", file.display(), e);
            }
            Err(e) => {
                tracing::error!("{}: {}", file.display(), e);
                eprintln!("Error: {}: {}", file.display(), e);
                failures += 1;
            }
        }
    }
    for handle in handles {
        if handle.join().is_err() {
            failures += 1;
        }
    }

    tracing::info!("Processing finished with {} failure(s)", failures);
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_inspect(file: &Path) -> ExitCode {
    match ReportBuilder::new().filename(file).inspect() {
        Ok(inspection) => {
            println!("{}", file.display());
            println!(
                "  main:    {} table(s), {} record(s)",
                inspection.main_tables, inspection.main_records
            );
            if inspection.has_dispute_section {
                println!(
                    "  dispute: {} table(s), {} record(s)",
                    inspection.dispute_tables, inspection.dispute_records
                );
            } else {
                println!("  dispute: no dispute section");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
