//! Persistence collaborators for imported flow files
//!
//! The parser decides *whether* a file's data is persisted; the store
//! decides *how*. A store receives one [`NewFlowFile`] per committed file
//! and must treat it as a single logical unit: either everything in it is
//! recorded or nothing is.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;

use crate::app::models::NewFlowFile;
use crate::{Error, Result};

/// Persistence seam for committed flow files
pub trait ReadingStore: Send + Sync {
    /// Record one file's flow-file record, metadata and readings atomically
    fn persist(&self, file: &NewFlowFile) -> Result<()>;
}

/// In-memory store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<Vec<NewFlowFile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every persisted file
    pub fn files(&self) -> Vec<NewFlowFile> {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of persisted flow files
    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Total number of persisted readings across all files
    pub fn reading_count(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|f| f.readings.len())
            .sum()
    }
}

impl ReadingStore for MemoryStore {
    fn persist(&self, file: &NewFlowFile) -> Result<()> {
        debug!(
            "memory store: persisting {}{} with {} readings",
            file.file.name,
            file.file.extension,
            file.readings.len()
        );
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(file.clone());
        Ok(())
    }
}

/// Append-only JSON-lines store
///
/// Each committed file becomes exactly one JSON document on its own line,
/// written with a single call so the per-file unit stays intact even when
/// multiple worker tasks commit concurrently.
#[derive(Debug)]
pub struct JsonLinesStore {
    output: Mutex<File>,
}

impl JsonLinesStore {
    /// Open (or create) the store file at `path` for appending
    pub fn open(path: &Path) -> Result<Self> {
        let output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::io(format!("failed to open store file {}", path.display()), e))?;
        Ok(Self {
            output: Mutex::new(output),
        })
    }
}

impl ReadingStore for JsonLinesStore {
    fn persist(&self, file: &NewFlowFile) -> Result<()> {
        let mut line = serde_json::to_string(file)
            .map_err(|e| Error::store_with_source("failed to serialize flow file", Box::new(e)))?;
        line.push('\n');

        let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
        output
            .write_all(line.as_bytes())
            .map_err(|e| Error::io("failed to write to store file", e))?;
        output
            .flush()
            .map_err(|e| Error::io("failed to flush store file", e))?;
        Ok(())
    }
}
