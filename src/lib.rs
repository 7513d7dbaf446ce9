//! D0010 Flow File Importer Library
//!
//! A Rust library for importing D0010 energy-market flow files: the
//! pipe-delimited exchange format carrying meter readings between market
//! participants.
//!
//! This library provides tools for:
//! - Parsing D0010 files record-by-record with strict per-field validation
//! - Accumulating meter/register record groups into flattened energy readings
//! - All-or-nothing per-file commit through a pluggable persistence store
//! - Parallel batch imports over directories of flow files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod flow_parser;
        pub mod importer;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::services::flow_parser::{FlowFileParser, ParseOutcome};
pub use app::services::importer::{ImportReport, Importer};
pub use config::Config;

/// Result type alias for the D0010 importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for D0010 import operations
///
/// These are the operational failures that abort work on one file (or the
/// whole run, for configuration problems). Field-level validation failures
/// are deliberately *not* represented here: those are accumulated per row as
/// [`app::services::flow_parser::RowError`] and evaluated in aggregate when
/// deciding whether a file commits.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input path is not a file or directory
    #[error("No valid file or directory found at {path}")]
    InputNotFound { path: String },

    /// Persistence collaborator rejected a write
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a store error without an underlying source
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error wrapping an underlying failure
    pub fn store_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}
