//! Command implementations for the D0010 importer CLI
//!
//! Contains the command execution logic: input collection, the bounded
//! parallel batch loop, per-file reporting and the final summary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::app::services::flow_parser::codes;
use crate::app::services::importer::{ImportReport, Importer};
use crate::app::services::store::{JsonLinesStore, MemoryStore, ReadingStore};
use crate::cli::args::{Args, Catalogue, CodesArgs, Commands, ImportArgs};
use crate::config::{Config, default_workers};
use crate::constants::DEFAULT_STORE_FILE;
use crate::{Error, Result};

/// Statistics for one import run
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Files submitted to the importer
    pub files_processed: usize,
    /// Files that passed validation and were persisted
    pub files_committed: usize,
    /// Files rejected by the all-or-nothing rule
    pub files_rejected: usize,
    /// Files that failed operationally (unreadable, store error)
    pub files_failed: usize,
    /// Readings persisted across all committed files
    pub readings_persisted: usize,
    /// Field-level errors surfaced across all rejected files
    pub errors_encountered: usize,
    /// Wall-clock duration of the run
    pub processing_time: std::time::Duration,
}

/// Main command runner
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<ImportSummary> {
    match args.command {
        Some(Commands::Import(import_args)) => run_import(import_args, cancellation_token).await,
        Some(Commands::Codes(codes_args)) => {
            run_codes(&codes_args);
            Ok(ImportSummary::default())
        }
        None => Err(Error::configuration("no command provided")),
    }
}

/// Execute the import command
async fn run_import(args: ImportArgs, token: CancellationToken) -> Result<ImportSummary> {
    setup_logging(&args);

    let mut config = Config::new(args.path.clone());
    if let Some(workers) = args.workers {
        config.processing.parallel_workers = workers;
    }
    config.processing.show_progress = args.show_progress();
    config.output.store_path = match args.dry_run {
        true => None,
        false => Some(
            args.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE)),
        ),
    };
    config.validate()?;

    info!(
        "Starting import of {} with {} workers",
        config.processing.input_path.display(),
        config.processing.parallel_workers
    );

    let files = collect_input_files(&config.processing.input_path)?;
    if files.is_empty() {
        warn!("no files found at {}", config.processing.input_path.display());
        return Ok(ImportSummary::default());
    }
    debug!("collected {} input files", files.len());

    let summary = match &config.output.store_path {
        Some(store_path) => {
            let store = Arc::new(JsonLinesStore::open(store_path)?);
            info!("Persisting to {}", store_path.display());
            import_batch(Importer::new(store), files, &config, token).await?
        }
        None => {
            println!("{}", "Dry run: nothing will be persisted".yellow());
            import_batch(Importer::new(Arc::new(MemoryStore::new())), files, &config, token).await?
        }
    };

    report_summary(&summary);
    Ok(summary)
}

/// Process a batch of files on a bounded pool of blocking workers
///
/// Files are independent: each produces its own report, is committed on its
/// own, and a failing file never blocks its siblings. The cancellation
/// token is honoured between files, never mid-file.
async fn import_batch<S: ReadingStore + 'static>(
    importer: Importer<S>,
    files: Vec<PathBuf>,
    config: &Config,
    token: CancellationToken,
) -> Result<ImportSummary> {
    let start_time = Instant::now();
    let total = files.len();

    let progress_bar = if config.processing.show_progress && total > 1 {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Importing flow files...");
        Some(pb)
    } else {
        None
    };

    let results: Vec<Option<Result<ImportReport>>> = stream::iter(files)
        .map(|path| {
            let importer = importer.clone();
            let token = token.clone();
            async move {
                if token.is_cancelled() {
                    debug!("skipping {} after cancellation", path.display());
                    return None;
                }
                let joined =
                    tokio::task::spawn_blocking(move || importer.import_file(&path)).await;
                Some(joined.unwrap_or_else(|e| {
                    Err(Error::processing_interrupted(format!(
                        "import worker failed: {e}"
                    )))
                }))
            }
        })
        .buffer_unordered(config.processing.parallel_workers)
        .inspect(|_| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }
    if token.is_cancelled() {
        warn!("import cancelled; remaining files were skipped");
    }

    let mut summary = ImportSummary::default();
    for result in results.into_iter().flatten() {
        summary.files_processed += 1;
        match result {
            Ok(report) => {
                report_file(&report);
                if report.committed {
                    summary.files_committed += 1;
                    summary.readings_persisted += report.readings_persisted;
                } else {
                    summary.files_rejected += 1;
                    summary.errors_encountered += report.errors.len();
                }
            }
            Err(e) => {
                error!("import failed: {e}");
                println!("{}", format!("Import failed: {e}").red());
                summary.files_failed += 1;
            }
        }
    }

    summary.processing_time = start_time.elapsed();
    Ok(summary)
}

/// Resolve the input path into the list of files to import
///
/// For a directory, every direct child that is a regular file is
/// submitted; subdirectories are not descended into.
pub fn collect_input_files(path: &std::path::Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::input_not_found(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("failed to scan {}", path.display()), e)
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Print the per-file outcome the way the operator sees it
fn report_file(report: &ImportReport) {
    if report.committed {
        println!(
            "{}",
            format!(
                "Data imported successfully from {} ({} readings)",
                report.path, report.readings_persisted
            )
            .green()
        );
    } else {
        for error in &report.errors {
            println!("{}", format!("Error processing {}: {}", report.path, error).red());
        }
        println!(
            "{}",
            format!("No data from this file will be persisted: {}", report.path).red()
        );
    }
}

/// Print the final run summary
fn report_summary(summary: &ImportSummary) {
    println!();
    println!(
        "Processed {} files in {}: {} committed, {} rejected, {} failed",
        summary.files_processed,
        HumanDuration(summary.processing_time),
        summary.files_committed.to_string().green(),
        summary.files_rejected.to_string().yellow(),
        summary.files_failed.to_string().red(),
    );
    println!(
        "{} readings persisted, {} validation errors",
        summary.readings_persisted, summary.errors_encountered
    );
}

/// Execute the codes command
fn run_codes(args: &CodesArgs) {
    let (title, table) = match args.catalogue {
        Catalogue::SiteVisitReasons => ("J0024 site visit reasons", codes::SITE_VISIT_REASONS),
        Catalogue::ReadingTypes => ("J0171 meter reading types", codes::READING_TYPES),
        Catalogue::ValidationReasons => {
            ("Meter reading validation reasons", codes::VALIDATION_REASONS)
        }
    };

    println!("{} ({} codes)", title.bold(), table.len());
    for (code, description) in table {
        println!("  {:<4} {}", code, description);
    }
}

/// Set up structured logging for the import command
fn setup_logging(args: &ImportArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("d0010_importer={}", args.log_level())));

    // Ignore the error if a subscriber is already installed (tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
