//! Record schemas for the D0010 record-type tags
//!
//! One constructor per tag, each an explicit ordered field list: the
//! sequence of codec calls *is* the schema. Rows are zipped positionally,
//! so a row may be shorter than its schema as long as only optional fields
//! are missing. All fields of a row are examined even after a failure; the
//! constructor returns every [`FieldError`] the row produced.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::codec::{self, FieldError};
use super::codes;
use super::row::Row;
use crate::constants::DATA_FLOW_LEN;

/// BSC validation status of an MPAN core (026)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BscValidationStatus {
    Failed,
    Unvalidated,
    Validated,
}

impl BscValidationStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(Self::Failed),
            "U" => Some(Self::Unvalidated),
            "V" => Some(Self::Validated),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Failed => "F",
            Self::Unvalidated => "U",
            Self::Validated => "V",
        }
    }
}

/// Valid/suspect flag carried by register readings and validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingFlag {
    Valid,
    Suspect,
}

impl ReadingFlag {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T" => Some(Self::Valid),
            "F" => Some(Self::Suspect),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Valid => "T",
            Self::Suspect => "F",
        }
    }
}

/// How a register reading was obtained (J1888)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingMethod {
    /// `N`: not viewed by an agent / no site visit
    NotSiteVisited,
    /// `P`: viewed by an agent / site visit
    SiteVisited,
}

impl ReadingMethod {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::NotSiteVisited),
            "P" => Some(Self::SiteVisited),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::NotSiteVisited => "N",
            Self::SiteVisited => "P",
        }
    }
}

/// ZHV/ZHF file header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub header_format: String,
    pub file_identifier: String,
    pub data_flow_and_version_number: String,
    /// First five characters of the data flow reference, e.g. `D0010`
    pub data_flow: String,
    /// Trailing digits of the data flow reference, e.g. `2` for `D0010002`
    pub data_flow_version: u16,
    pub from_market_participant_role_code: String,
    pub from_market_participant_id: String,
    pub to_market_participant_role_code: String,
    pub to_market_participant_id: String,
    pub file_created_at: DateTime<Utc>,
    pub sending_application_id: String,
    pub receiving_application_id: String,
    pub broadcast: String,
    pub test_data_flag: String,
}

// ASCII classes only: a match guarantees the byte slices below land on
// char boundaries
static DATA_FLOW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^D[0-9A-Za-z_]{4}[0-9]{3}$").unwrap());

/// Decode the composite data-flow-and-version field, splitting it into the
/// flow reference and its numeric version
fn data_flow_and_version(value: Option<&str>) -> Result<(String, String, u16), FieldError> {
    const FIELD: &str = "data_flow_and_version_number";
    let value = codec::bounded(value, FIELD, 8)?;
    let version = match DATA_FLOW_PATTERN.is_match(&value) {
        true => value[DATA_FLOW_LEN..].parse::<u16>().ok(),
        false => None,
    };
    match version {
        Some(version) => {
            let data_flow = value[..DATA_FLOW_LEN].to_string();
            Ok((value, data_flow, version))
        }
        None => Err(FieldError::FieldFormatInvalid {
            field: FIELD,
            value,
            expected: "data flow reference and version (D____NNN)".to_string(),
        }),
    }
}

impl Header {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let header_format = capture(
            &mut errors,
            codec::literal(row.field(0), "header_format", "ZHV/ZHF"),
        );
        let file_identifier = capture(
            &mut errors,
            codec::bounded(row.field(1), "file_identifier", 10),
        );
        let flow = capture(&mut errors, data_flow_and_version(row.field(2)));
        let from_role = capture(
            &mut errors,
            codec::bounded(row.field(3), "from_market_participant_role_code", 1),
        );
        let from_id = capture(
            &mut errors,
            codec::bounded(row.field(4), "from_market_participant_id", 4),
        );
        let to_role = capture(
            &mut errors,
            codec::bounded(row.field(5), "to_market_participant_role_code", 1),
        );
        let to_id = capture(
            &mut errors,
            codec::bounded(row.field(6), "to_market_participant_id", 4),
        );
        let file_created_at = capture(
            &mut errors,
            codec::timestamp(row.field(7), "file_created_at"),
        );
        let sending_application_id = capture(
            &mut errors,
            codec::optional_bounded(row.field(8), "sending_application_id", 5),
        );
        let receiving_application_id = capture(
            &mut errors,
            codec::optional_bounded(row.field(9), "receiving_application_id", 5),
        );
        let broadcast = capture(&mut errors, codec::optional_bounded(row.field(10), "broadcast", 1));
        let test_data_flag = capture(
            &mut errors,
            codec::optional_bounded(row.field(11), "test_data_flag", 4),
        );

        let (
            true,
            Some(header_format),
            Some(file_identifier),
            Some((data_flow_and_version_number, data_flow, data_flow_version)),
            Some(from_market_participant_role_code),
            Some(from_market_participant_id),
            Some(to_market_participant_role_code),
            Some(to_market_participant_id),
            Some(file_created_at),
            Some(sending_application_id),
            Some(receiving_application_id),
            Some(broadcast),
            Some(test_data_flag),
        ) = (
            errors.is_empty(),
            header_format,
            file_identifier,
            flow,
            from_role,
            from_id,
            to_role,
            to_id,
            file_created_at,
            sending_application_id,
            receiving_application_id,
            broadcast,
            test_data_flag,
        )
        else {
            return Err(errors);
        };

        Ok(Self {
            header_format,
            file_identifier,
            data_flow_and_version_number,
            data_flow,
            data_flow_version,
            from_market_participant_role_code,
            from_market_participant_id,
            to_market_participant_role_code,
            to_market_participant_id,
            file_created_at,
            sending_application_id,
            receiving_application_id,
            broadcast,
            test_data_flag,
        })
    }
}

/// ZPT file footer
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub footer_format: String,
    pub file_identifier: String,
    pub total_group_count: u32,
    pub checksum: Option<i64>,
    pub flow_count: Option<i64>,
    pub file_completed_at: Option<DateTime<Utc>>,
}

impl Footer {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let footer_format = capture(&mut errors, codec::literal(row.field(0), "footer_format", "ZPT"));
        let file_identifier = capture(
            &mut errors,
            codec::bounded(row.field(1), "file_identifier", 10),
        );
        let total_group_count = capture(&mut errors, codec::int(row.field(2), "total_group_count"));
        let checksum = capture(&mut errors, codec::optional_int(row.field(3), "checksum"));
        let flow_count = capture(&mut errors, codec::optional_int(row.field(4), "flow_count"));
        let file_completed_at = capture(
            &mut errors,
            codec::optional_timestamp(row.field(5), "file_completed_at"),
        );

        let (
            true,
            Some(footer_format),
            Some(file_identifier),
            Some(total_group_count),
            Some(checksum),
            Some(flow_count),
            Some(file_completed_at),
        ) = (
            errors.is_empty(),
            footer_format,
            file_identifier,
            total_group_count,
            checksum,
            flow_count,
            file_completed_at,
        )
        else {
            return Err(errors);
        };

        Ok(Self {
            footer_format,
            file_identifier,
            total_group_count,
            checksum,
            flow_count,
            file_completed_at,
        })
    }
}

/// 026: MPAN core, the national metering point identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpanCore {
    pub mpan_core: String,
    pub bsc_validation_status: BscValidationStatus,
}

impl MpanCore {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag = capture(&mut errors, codec::literal(row.field(0), "code", "026"));
        let mpan_core = capture(&mut errors, codec::bounded(row.field(1), "mpan_core", 13));
        let status = capture(
            &mut errors,
            codec::coded(
                row.field(2),
                "bsc_validation_status",
                "BSC validation status",
                BscValidationStatus::from_code,
            ),
        );

        let (true, Some(_), Some(mpan_core), Some(bsc_validation_status)) =
            (errors.is_empty(), tag, mpan_core, status)
        else {
            return Err(errors);
        };

        Ok(Self {
            mpan_core,
            bsc_validation_status,
        })
    }
}

/// 027/029/033: site visit details (J0024)
///
/// The three tags share one shape; which context the visit attaches to is
/// decided by the accumulator, not the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteVisit {
    pub visit_reason: String,
    pub additional_information: String,
}

impl SiteVisit {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag = capture(
            &mut errors,
            codec::literal(row.field(0), "code", "027/029/033"),
        );
        let visit_reason = capture(
            &mut errors,
            codec::coded(
                row.field(1),
                "visit_reason",
                "J0024 site visit reason",
                |code| codes::site_visit_reason(code).map(|_| code.to_string()),
            ),
        );
        let additional_information = capture(
            &mut errors,
            codec::bounded(row.field(2), "additional_information", 200),
        );

        let (true, Some(_), Some(visit_reason), Some(additional_information)) =
            (errors.is_empty(), tag, visit_reason, additional_information)
        else {
            return Err(errors);
        };

        Ok(Self {
            visit_reason,
            additional_information,
        })
    }
}

/// 028: meter serial number and reading type (J0004, J0171)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterReadingType {
    pub meter_id: String,
    pub reading_type: String,
}

impl MeterReadingType {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag = capture(&mut errors, codec::literal(row.field(0), "code", "028"));
        let meter_id = capture(&mut errors, codec::bounded(row.field(1), "meter_id", 10));
        let reading_type = capture(
            &mut errors,
            codec::coded(
                row.field(2),
                "reading_type",
                "J0171 meter reading type",
                |code| codes::reading_type(code).map(|_| code.to_string()),
            ),
        );

        let (true, Some(_), Some(meter_id), Some(reading_type)) =
            (errors.is_empty(), tag, meter_id, reading_type)
        else {
            return Err(errors);
        };

        Ok(Self {
            meter_id,
            reading_type,
        })
    }
}

/// 030: one register's reading with its timestamps and flags
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterReading {
    pub meter_register_id: String,
    pub reading_at: DateTime<Utc>,
    pub register_reading: f64,
    pub md_reset_at: Option<DateTime<Utc>>,
    pub number_of_md_resets: Option<u16>,
    pub meter_reading_flag: Option<ReadingFlag>,
    pub reading_method: ReadingMethod,
}

impl RegisterReading {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag = capture(&mut errors, codec::literal(row.field(0), "code", "030"));
        let meter_register_id = capture(
            &mut errors,
            codec::bounded(row.field(1), "meter_register_id", 2),
        );
        let reading_at = capture(&mut errors, codec::timestamp(row.field(2), "reading_at"));
        let register_reading = capture(&mut errors, codec::float(row.field(3), "register_reading"));
        let md_reset_at = capture(
            &mut errors,
            codec::optional_timestamp(row.field(4), "md_reset_at"),
        );
        let number_of_md_resets = capture(
            &mut errors,
            codec::optional_int_below(
                row.field(5),
                "number_of_md_resets",
                crate::constants::MAX_MD_RESETS,
            ),
        );
        let meter_reading_flag = capture(
            &mut errors,
            codec::optional_coded(
                row.field(6),
                "meter_reading_flag",
                "meter reading flag",
                ReadingFlag::from_code,
            ),
        );
        let reading_method = capture(
            &mut errors,
            codec::coded(
                row.field(7),
                "reading_method",
                "J1888 reading method",
                ReadingMethod::from_code,
            ),
        );

        let (
            true,
            Some(_),
            Some(meter_register_id),
            Some(reading_at),
            Some(register_reading),
            Some(md_reset_at),
            Some(number_of_md_resets),
            Some(meter_reading_flag),
            Some(reading_method),
        ) = (
            errors.is_empty(),
            tag,
            meter_register_id,
            reading_at,
            register_reading,
            md_reset_at,
            number_of_md_resets,
            meter_reading_flag,
            reading_method,
        )
        else {
            return Err(errors);
        };

        Ok(Self {
            meter_register_id,
            reading_at,
            register_reading,
            md_reset_at,
            number_of_md_resets,
            meter_reading_flag,
            reading_method,
        })
    }
}

/// 032: meter reading validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub reason: String,
    pub status: ReadingFlag,
}

impl ValidationResult {
    pub fn from_row(row: &Row) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag = capture(&mut errors, codec::literal(row.field(0), "code", "032"));
        let reason = capture(
            &mut errors,
            codec::coded(
                row.field(1),
                "reason",
                "meter reading validation reason",
                |code| codes::validation_reason(code).map(|_| code.to_string()),
            ),
        );
        let status = capture(
            &mut errors,
            codec::coded(
                row.field(2),
                "status",
                "meter reading status",
                ReadingFlag::from_code,
            ),
        );

        let (true, Some(_), Some(reason), Some(status)) = (errors.is_empty(), tag, reason, status)
        else {
            return Err(errors);
        };

        Ok(Self { reason, status })
    }
}

/// Record `result` into `errors` if it failed, passing the value through
fn capture<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}
