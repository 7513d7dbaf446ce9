//! Command-line argument definitions for the D0010 importer
//!
//! The complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the D0010 flow file importer
#[derive(Debug, Clone, Parser)]
#[command(
    name = "d0010-importer",
    version,
    about = "Import D0010 energy-market flow files into a structured store",
    long_about = "Parses pipe-delimited D0010 flow files carrying meter readings, validates \
                  every record against the published field schemas, and persists complete \
                  files as one unit. A file containing any invalid field contributes nothing; \
                  other files in the same batch are unaffected."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a flow file, or every file directly inside a directory
    Import(ImportArgs),
    /// Print one of the closed code catalogues used for validation
    Codes(CodesArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Path to a D0010 file or a directory of D0010 files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output path for the JSON-lines store
    ///
    /// Defaults to ./flow_file_imports.jsonl. Ignored with --dry-run.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        conflicts_with = "dry_run"
    )]
    pub output: Option<PathBuf>,

    /// Number of files to process in parallel (defaults to CPU count)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Parse and validate without persisting anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Suppress progress output, log warnings and errors only
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl ImportArgs {
    /// Log level implied by the quiet/verbose flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Progress bars only make sense for interactive, non-quiet runs
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments for the codes command
#[derive(Debug, Clone, Parser)]
pub struct CodesArgs {
    /// Which catalogue to print
    #[arg(value_enum)]
    pub catalogue: Catalogue,
}

/// The closed code catalogues of the D0010 data dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Catalogue {
    /// J0024 site visit check codes (027/029/033 records)
    SiteVisitReasons,
    /// J0171 meter reading types (028 records)
    ReadingTypes,
    /// Validation failure reasons (032 records)
    ValidationReasons,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_follows_flags() {
        let base = ImportArgs {
            path: PathBuf::from("flows"),
            output: None,
            workers: None,
            dry_run: false,
            quiet: false,
            verbose: false,
        };
        assert_eq!(base.log_level(), "info");
        assert_eq!(
            ImportArgs {
                quiet: true,
                ..base.clone()
            }
            .log_level(),
            "warn"
        );
        assert_eq!(
            ImportArgs {
                verbose: true,
                ..base
            }
            .log_level(),
            "debug"
        );
    }

    #[test]
    fn import_args_parse() {
        let args = Args::parse_from(["d0010-importer", "import", "flows/", "-w", "2", "--dry-run"]);
        let Some(Commands::Import(import)) = args.command else {
            panic!("expected import subcommand");
        };
        assert_eq!(import.path, PathBuf::from("flows/"));
        assert_eq!(import.workers, Some(2));
        assert!(import.dry_run);
    }
}
