//! Application constants for the D0010 importer
//!
//! This module contains the fixed wire-format constants of the D0010 flow
//! specification and default values used throughout the application.

// =============================================================================
// Wire Format Constants
// =============================================================================

/// Field delimiter used by D0010 flow files
pub const FIELD_DELIMITER: char = '|';

/// Packed timestamp format carried in header, footer and register readings
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Exact length of a packed `YYYYMMDDHHMMSS` timestamp
pub const TIMESTAMP_LEN: usize = 14;

/// Length of the data flow reference prefix in `data_flow_and_version_number`
/// (e.g. the `D0010` in `D0010002`)
pub const DATA_FLOW_LEN: usize = 5;

/// Exclusive upper bound on the number of maximum-demand resets (J1013)
pub const MAX_MD_RESETS: u16 = 999;

// =============================================================================
// Processing Defaults
// =============================================================================

/// Fallback number of parallel file workers when CPU detection fails
pub const DEFAULT_PARALLEL_WORKERS: usize = 4;

/// Default file name for the JSON-lines store when importing for real
pub const DEFAULT_STORE_FILE: &str = "flow_file_imports.jsonl";
