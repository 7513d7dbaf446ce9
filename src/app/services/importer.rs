//! Per-file import orchestration
//!
//! Parses one flow file and applies the all-or-nothing commit rule: a file
//! with any field-level error contributes nothing to the store, and one
//! file's outcome never affects its siblings in a batch.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::app::models::{EnergyReadingRecord, FlowFileRecord, NewFlowFile};
use crate::app::services::flow_parser::{FlowFileParser, ParseStats, RowError};
use crate::app::services::store::ReadingStore;
use crate::Result;

/// What happened to one file during import
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Display path of the imported file
    pub path: String,
    /// True when the file passed validation and was handed to the store
    pub committed: bool,
    /// Readings persisted (zero when not committed)
    pub readings_persisted: usize,
    /// True when header+footer metadata was persisted alongside the readings
    pub metadata_persisted: bool,
    /// Every field-level error the scan surfaced
    pub errors: Vec<RowError>,
    pub stats: ParseStats,
}

/// Imports flow files through a persistence store
#[derive(Debug)]
pub struct Importer<S> {
    parser: FlowFileParser,
    store: Arc<S>,
}

impl<S> Clone for Importer<S> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser,
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ReadingStore> Importer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            parser: FlowFileParser::new(),
            store,
        }
    }

    /// Import a single flow file
    ///
    /// Returns `Err` only for operational failures (unreadable file,
    /// store write failure). A file that fails validation yields
    /// `Ok` with `committed == false` and the full error list, so batch
    /// callers can keep going with sibling files.
    pub fn import_file(&self, path: &Path) -> Result<ImportReport> {
        let outcome = self.parser.parse_file(path)?;

        if !outcome.is_committable() {
            warn!(
                "{}: {} validation errors, nothing will be persisted",
                path.display(),
                outcome.errors.len()
            );
            return Ok(ImportReport {
                path: path.display().to_string(),
                committed: false,
                readings_persisted: 0,
                metadata_persisted: false,
                errors: outcome.errors,
                stats: outcome.stats,
            });
        }

        let metadata = outcome.metadata();
        let new_file = NewFlowFile {
            file: FlowFileRecord {
                name: file_stem(path),
                extension: file_extension(path),
                imported_at: Utc::now(),
            },
            metadata: metadata.clone(),
            readings: outcome.groups.iter().map(EnergyReadingRecord::from).collect(),
        };

        self.store.persist(&new_file)?;
        info!(
            "{}: committed {} readings (metadata: {})",
            path.display(),
            new_file.readings.len(),
            metadata.is_some()
        );

        Ok(ImportReport {
            path: path.display().to_string(),
            committed: true,
            readings_persisted: new_file.readings.len(),
            metadata_persisted: metadata.is_some(),
            errors: Vec::new(),
            stats: outcome.stats,
        })
    }
}

/// File name without its extension
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extension with its leading dot, matching how the file was transmitted
fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::store::MemoryStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_FILE: &str = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|V|
028|F75A 00802|D|
030|01|20160222000000|56311.0|||T|N|
ZPT|0000475656|1||1|20160302153151";

    const INVALID_FILE: &str = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|X|
030|01|20160222000000|56311.0|||T|N|
ZPT|0000475656|1||1|20160302153151";

    fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_file_commits_readings_and_metadata() {
        let store = Arc::new(MemoryStore::new());
        let importer = Importer::new(Arc::clone(&store));
        let file = write_temp(VALID_FILE, ".uff");

        let report = importer.import_file(file.path()).unwrap();
        assert!(report.committed);
        assert_eq!(report.readings_persisted, 1);
        assert!(report.metadata_persisted);
        assert!(report.errors.is_empty());

        let persisted = store.files();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].file.extension, ".uff");
        assert_eq!(persisted[0].readings[0].mpan_core, "1200023305967");
        assert_eq!(persisted[0].readings[0].register_reading, Some(56311.0));
    }

    #[test]
    fn invalid_file_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let importer = Importer::new(Arc::clone(&store));
        let file = write_temp(INVALID_FILE, ".uff");

        let report = importer.import_file(file.path()).unwrap();
        assert!(!report.committed);
        assert_eq!(report.readings_persisted, 0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(store.file_count(), 0);
        assert_eq!(store.reading_count(), 0);
    }

    #[test]
    fn missing_file_is_an_operational_error() {
        let store = Arc::new(MemoryStore::new());
        let importer = Importer::new(store);
        let result = importer.import_file(Path::new("/nonexistent/flow.uff"));
        assert!(result.is_err());
    }
}
