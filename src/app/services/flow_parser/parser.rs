//! Flow file parsing orchestration
//!
//! Drives the row parser and group accumulator over one file's lines in
//! order, collecting every field-level error without aborting, and decides
//! after the scan whether the file's contents are trustworthy enough to
//! persist. Parsing one file is strictly sequential: the accumulator's
//! state depends on line order.

use std::path::Path;

use tracing::{debug, info, warn};

use super::accumulator::{EnergyReadingGroup, GroupAccumulator};
use super::codec::FieldError;
use super::records::{
    Footer, Header, MeterReadingType, MpanCore, RegisterReading, SiteVisit, ValidationResult,
};
use super::row::{RecordTag, Row};
use super::stats::ParseStats;
use crate::app::models::FlowFileMetadata;
use crate::{Error, Result};

/// One field-level failure, located by line and record tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number within the file
    pub line: usize,
    /// Raw record-type tag of the offending row
    pub tag: String,
    pub source: FieldError,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} ({}): {}", self.line, self.tag, self.source)
    }
}

/// The complete result of scanning one flow file
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub header: Option<Header>,
    pub footer: Option<Footer>,
    /// Accumulated groups, in file order
    pub groups: Vec<EnergyReadingGroup>,
    /// Every field-level error found anywhere in the file
    pub errors: Vec<RowError>,
    pub stats: ParseStats,
}

impl ParseOutcome {
    /// All-or-nothing commit rule: a file commits only if no field of any
    /// row failed validation
    pub fn is_committable(&self) -> bool {
        self.errors.is_empty()
    }

    /// File metadata, available only when header and footer both arrived
    pub fn metadata(&self) -> Option<FlowFileMetadata> {
        let header = self.header.as_ref()?;
        let footer = self.footer.as_ref()?;
        Some(FlowFileMetadata::from_header_and_footer(header, footer))
    }
}

/// Line-by-line parser for D0010 flow files
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowFileParser;

impl FlowFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a flow file from disk
    ///
    /// I/O failures are reported to the caller; validation failures are
    /// not; they land in the outcome's error list so the whole file can
    /// be judged in one pass.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome> {
        info!("Parsing flow file: {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
        let outcome = self.parse_content(&content);
        info!(
            "Parsed {}: {} groups, {} errors",
            path.display(),
            outcome.groups.len(),
            outcome.errors.len()
        );
        Ok(outcome)
    }

    /// Parse flow file content that is already in memory
    pub fn parse_content(&self, content: &str) -> ParseOutcome {
        let mut stats = ParseStats::new();
        let mut errors: Vec<RowError> = Vec::new();
        let mut header: Option<Header> = None;
        let mut footer: Option<Footer> = None;
        let mut accumulator = GroupAccumulator::new();

        for (index, raw_line) in content.lines().enumerate() {
            stats.lines_read += 1;
            let row = Row::split(index + 1, raw_line);
            let Some(tag) = row.tag() else {
                stats.rows_ignored += 1;
                if row.is_empty() {
                    debug!("line {}: skipping blank line", row.line());
                } else {
                    debug!("line {}: ignoring unrecognised tag '{}'", row.line(), row.raw_tag());
                }
                continue;
            };

            match tag {
                RecordTag::Header => match Header::from_row(&row) {
                    Ok(parsed) => {
                        stats.rows_parsed += 1;
                        header = Some(parsed);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::MpanCore => match MpanCore::from_row(&row) {
                    Ok(core) => {
                        stats.rows_parsed += 1;
                        accumulator.start_mpan(core);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::MpanSiteVisit => match SiteVisit::from_row(&row) {
                    Ok(visit) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_mpan_site_visit(visit);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::MeterReadingType => match MeterReadingType::from_row(&row) {
                    Ok(reading_type) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_meter_reading_type(reading_type);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::MeterReadingSiteVisit => match SiteVisit::from_row(&row) {
                    Ok(visit) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_meter_reading_site_visit(visit);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::RegisterReading => match RegisterReading::from_row(&row) {
                    Ok(reading) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_register_reading(reading);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::ValidationResult => match ValidationResult::from_row(&row) {
                    Ok(result) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_validation_result(result);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::RegisterSiteVisit => match SiteVisit::from_row(&row) {
                    Ok(visit) => {
                        stats.rows_parsed += 1;
                        accumulator.attach_register_site_visit(visit);
                    }
                    Err(field_errors) => record_failure(&mut stats, &mut errors, &row, field_errors),
                },
                RecordTag::Footer => {
                    match Footer::from_row(&row) {
                        Ok(parsed) => {
                            stats.rows_parsed += 1;
                            footer = Some(parsed);
                        }
                        Err(field_errors) => {
                            record_failure(&mut stats, &mut errors, &row, field_errors)
                        }
                    }
                    // The footer terminates the scan whether or not its own
                    // fields validated; anything after it is expected to be
                    // blank or unrelated trailing content.
                    debug!("line {}: footer reached, stopping scan", row.line());
                    break;
                }
            }
        }

        if footer.is_none() {
            warn!("no footer found; file metadata will be incomplete");
        }

        let groups = accumulator.finish();
        stats.groups_built = groups.len();

        ParseOutcome {
            header,
            footer,
            groups,
            errors,
            stats,
        }
    }
}

fn record_failure(
    stats: &mut ParseStats,
    errors: &mut Vec<RowError>,
    row: &Row,
    field_errors: Vec<FieldError>,
) {
    stats.rows_failed += 1;
    for source in field_errors {
        warn!("line {} ({}): {}", row.line(), row.raw_tag(), source);
        errors.push(RowError {
            line: row.line(),
            tag: row.raw_tag().to_string(),
            source,
        });
    }
}
