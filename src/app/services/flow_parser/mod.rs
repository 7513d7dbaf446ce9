//! D0010 flow file parser
//!
//! A stateful line-by-line interpreter for the pipe-delimited D0010
//! exchange format. Raw lines are classified by their record-type tag,
//! decoded field-by-field against fixed schemas, and accumulated into
//! energy reading groups, one group per register reading, sharing
//! meter-level context across the registers of one MPAN core.
//!
//! ## Architecture
//!
//! - [`row`] - Line splitting and record-tag classification
//! - [`codec`] - Single-field decoding against typed constraints
//! - [`codes`] - Closed code catalogues from the D0010 data dictionary
//! - [`records`] - One explicit ordered field schema per record tag
//! - [`accumulator`] - The group accumulation state machine
//! - [`parser`] - Per-file orchestration and the commit decision
//! - [`stats`] - Scan statistics
//!
//! ## Usage
//!
//! ```rust
//! use d0010_importer::app::services::flow_parser::FlowFileParser;
//!
//! let content = "ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|\n\
//!                026|1200023305967|V|\n\
//!                030|01|20160222000000|56311.0|||T|N|\n\
//!                ZPT|0000475656|2||1|20160302153151";
//! let outcome = FlowFileParser::new().parse_content(content);
//! assert!(outcome.is_committable());
//! assert_eq!(outcome.groups.len(), 1);
//! ```

pub mod accumulator;
pub mod codec;
pub mod codes;
pub mod records;
pub mod row;
pub mod stats;

mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use accumulator::{EnergyReadingGroup, GroupAccumulator};
pub use codec::FieldError;
pub use parser::{FlowFileParser, ParseOutcome, RowError};
pub use records::{Footer, Header};
pub use row::{RecordTag, Row};
pub use stats::ParseStats;
