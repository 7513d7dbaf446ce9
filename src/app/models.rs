//! Persistence-facing data models
//!
//! Flattened records handed to the [`ReadingStore`] collaborator, one
//! logical unit per file. Slots the flow file never populated flatten to
//! empty strings or absent values so every reading row carries the same
//! columns.
//!
//! [`ReadingStore`]: crate::app::services::store::ReadingStore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::services::flow_parser::accumulator::EnergyReadingGroup;
use crate::app::services::flow_parser::records::{Footer, Header};

/// One imported flow file, identified by base name and extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowFileRecord {
    /// File name without its extension
    pub name: String,
    /// Extension including the leading dot, or empty if the file had none
    pub extension: String,
    pub imported_at: DateTime<Utc>,
}

/// File-level metadata combined from the ZHV header and ZPT footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowFileMetadata {
    pub header_format: String,
    pub footer_format: String,
    /// File identifier as carried by the footer
    pub file_identifier: String,
    pub data_flow: String,
    pub data_flow_version: u16,
    pub from_market_participant_role_code: String,
    pub from_market_participant_id: String,
    pub to_market_participant_role_code: String,
    pub to_market_participant_id: String,
    pub sending_application_id: String,
    pub receiving_application_id: String,
    pub broadcast: String,
    pub test_data_flag: String,
    pub total_group_count: u32,
    pub footer_checksum: Option<i64>,
    pub flow_count: Option<i64>,
    pub file_created_at: DateTime<Utc>,
    pub file_completed_at: Option<DateTime<Utc>>,
}

impl FlowFileMetadata {
    /// Combine a parsed header and footer into one metadata record
    pub fn from_header_and_footer(header: &Header, footer: &Footer) -> Self {
        Self {
            header_format: header.header_format.clone(),
            footer_format: footer.footer_format.clone(),
            file_identifier: footer.file_identifier.clone(),
            data_flow: header.data_flow.clone(),
            data_flow_version: header.data_flow_version,
            from_market_participant_role_code: header.from_market_participant_role_code.clone(),
            from_market_participant_id: header.from_market_participant_id.clone(),
            to_market_participant_role_code: header.to_market_participant_role_code.clone(),
            to_market_participant_id: header.to_market_participant_id.clone(),
            sending_application_id: header.sending_application_id.clone(),
            receiving_application_id: header.receiving_application_id.clone(),
            broadcast: header.broadcast.clone(),
            test_data_flag: header.test_data_flag.clone(),
            total_group_count: footer.total_group_count,
            footer_checksum: footer.checksum,
            flow_count: footer.flow_count,
            file_created_at: header.file_created_at,
            file_completed_at: footer.file_completed_at,
        }
    }
}

/// One energy reading with every meter/register/validation/site-visit
/// field flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReadingRecord {
    // MPAN core
    pub mpan_core: String,
    pub bsc_validation_status: String,
    // MPAN site visit
    pub mpan_site_visit_reason: String,
    pub mpan_site_visit_additional_information: String,
    // Meter reading type
    pub meter_id: String,
    pub meter_reading_type: String,
    // Meter reading site visit
    pub meter_reading_site_visit_reason: String,
    pub meter_reading_site_visit_additional_information: String,
    // Register reading
    pub meter_register_id: String,
    pub reading_at: Option<DateTime<Utc>>,
    pub register_reading: Option<f64>,
    pub md_reset_at: Option<DateTime<Utc>>,
    pub number_of_md_resets: Option<u16>,
    pub meter_reading_flag: String,
    pub reading_method: String,
    // Meter reading validation result
    pub meter_reading_validation_result_reason: String,
    pub meter_reading_validation_result_status: String,
    // Register reading site visit
    pub register_reading_site_visit_reason: String,
    pub register_reading_site_visit_additional_information: String,
}

impl From<&EnergyReadingGroup> for EnergyReadingRecord {
    fn from(group: &EnergyReadingGroup) -> Self {
        let core = group.mpan_core.as_ref();
        let mpan_visit = group.mpan_site_visit.as_ref();
        let reading_type = group.meter_reading_type.as_ref();
        let meter_visit = group.meter_reading_site_visit.as_ref();
        let reading = group.register_reading.as_ref();
        let validation = group.validation_result.as_ref();
        let register_visit = group.register_site_visit.as_ref();

        Self {
            mpan_core: core.map(|c| c.mpan_core.clone()).unwrap_or_default(),
            bsc_validation_status: core
                .map(|c| c.bsc_validation_status.as_code().to_string())
                .unwrap_or_default(),
            mpan_site_visit_reason: mpan_visit
                .map(|v| v.visit_reason.clone())
                .unwrap_or_default(),
            mpan_site_visit_additional_information: mpan_visit
                .map(|v| v.additional_information.clone())
                .unwrap_or_default(),
            meter_id: reading_type.map(|t| t.meter_id.clone()).unwrap_or_default(),
            meter_reading_type: reading_type
                .map(|t| t.reading_type.clone())
                .unwrap_or_default(),
            meter_reading_site_visit_reason: meter_visit
                .map(|v| v.visit_reason.clone())
                .unwrap_or_default(),
            meter_reading_site_visit_additional_information: meter_visit
                .map(|v| v.additional_information.clone())
                .unwrap_or_default(),
            meter_register_id: reading
                .map(|r| r.meter_register_id.clone())
                .unwrap_or_default(),
            reading_at: reading.map(|r| r.reading_at),
            register_reading: reading.map(|r| r.register_reading),
            md_reset_at: reading.and_then(|r| r.md_reset_at),
            number_of_md_resets: reading.and_then(|r| r.number_of_md_resets),
            meter_reading_flag: reading
                .and_then(|r| r.meter_reading_flag)
                .map(|f| f.as_code().to_string())
                .unwrap_or_default(),
            reading_method: reading
                .map(|r| r.reading_method.as_code().to_string())
                .unwrap_or_default(),
            meter_reading_validation_result_reason: validation
                .map(|v| v.reason.clone())
                .unwrap_or_default(),
            meter_reading_validation_result_status: validation
                .map(|v| v.status.as_code().to_string())
                .unwrap_or_default(),
            register_reading_site_visit_reason: register_visit
                .map(|v| v.visit_reason.clone())
                .unwrap_or_default(),
            register_reading_site_visit_additional_information: register_visit
                .map(|v| v.additional_information.clone())
                .unwrap_or_default(),
        }
    }
}

/// Everything one file contributes to the store, committed as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlowFile {
    pub file: FlowFileRecord,
    /// Present only when header and footer were both in the file
    pub metadata: Option<FlowFileMetadata>,
    pub readings: Vec<EnergyReadingRecord>,
}
