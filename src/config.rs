//! Configuration for import runs
//!
//! Settings resolved from CLI arguments with sensible defaults; validated
//! once before any file is touched.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_PARALLEL_WORKERS;
use crate::{Error, Result};

/// Processing settings for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// File or directory to import
    pub input_path: PathBuf,

    /// Upper bound on files processed concurrently
    pub parallel_workers: usize,

    /// Show the batch progress bar
    pub show_progress: bool,
}

/// Output settings for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON-lines store path; `None` selects the in-memory dry-run store
    pub store_path: Option<PathBuf>,
}

/// Complete configuration for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Build a configuration with defaults for everything but the input
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            processing: ProcessingConfig {
                input_path,
                parallel_workers: default_workers(),
                show_progress: true,
            },
            output: OutputConfig { store_path: None },
        }
    }

    /// Validate the configuration before processing starts
    pub fn validate(&self) -> Result<()> {
        if self.processing.parallel_workers == 0 {
            return Err(Error::configuration("parallel_workers must be at least 1"));
        }
        if !self.processing.input_path.exists() {
            return Err(Error::input_not_found(
                self.processing.input_path.display().to_string(),
            ));
        }
        Ok(())
    }
}

/// Worker count derived from the CPU topology
pub fn default_workers() -> usize {
    let cpus = num_cpus::get();
    if cpus == 0 { DEFAULT_PARALLEL_WORKERS } else { cpus }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path().to_path_buf());
        config.processing.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_input_is_rejected() {
        let config = Config::new(PathBuf::from("/nonexistent/input"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_validate_for_existing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
        assert!(config.processing.parallel_workers >= 1);
    }
}
