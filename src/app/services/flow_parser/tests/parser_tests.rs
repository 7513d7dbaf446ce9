//! File-level orchestration tests: ordering, early termination, and the
//! all-or-nothing commit decision

use chrono::{TimeZone, Utc};

use super::{TWO_METERS_THREE_READINGS, VALID_SINGLE_READING};
use crate::app::services::flow_parser::codec::FieldError;
use crate::app::services::flow_parser::FlowFileParser;

#[test]
fn valid_file_parses_to_one_group_and_commits() {
    let outcome = FlowFileParser::new().parse_content(VALID_SINGLE_READING);

    assert!(outcome.is_committable());
    assert_eq!(outcome.groups.len(), 1);

    let group = &outcome.groups[0];
    assert_eq!(group.mpan_core.as_ref().unwrap().mpan_core, "1200023305967");
    let reading = group.register_reading.as_ref().unwrap();
    assert_eq!(reading.meter_register_id, "01");
    assert_eq!(reading.register_reading, 56311.0);

    let header = outcome.header.as_ref().unwrap();
    assert_eq!(header.data_flow_and_version_number, "D0010002");
    let footer = outcome.footer.as_ref().unwrap();
    assert_eq!(footer.total_group_count, 1);
}

#[test]
fn group_count_equals_the_number_of_030_rows() {
    let outcome = FlowFileParser::new().parse_content(TWO_METERS_THREE_READINGS);
    assert!(outcome.is_committable());
    assert_eq!(outcome.groups.len(), 3);
    assert_eq!(outcome.stats.groups_built, 3);

    // The second meter's two registers share meter-level context
    assert_eq!(outcome.groups[1].mpan_core, outcome.groups[2].mpan_core);
    assert_eq!(
        outcome.groups[1].meter_reading_type,
        outcome.groups[2].meter_reading_type
    );
    // ... but not register-level context
    assert!(outcome.groups[1].validation_result.is_some());
    assert!(outcome.groups[2].validation_result.is_none());
}

#[test]
fn unrecognised_tags_are_ignored_without_errors_or_state_changes() {
    let content = "\
026|1200023305967|V|
031|something|unrelated|
ZPD|other|flow|records|
030|01|20160222000000|56311.0|||T|N|

ZPT|0000475656|1|||";
    let outcome = FlowFileParser::new().parse_content(content);
    assert!(outcome.is_committable());
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.stats.rows_ignored, 3);
}

#[test]
fn footer_halts_consumption_of_the_file() {
    let content = "\
026|1200023305967|V|
030|01|20160222000000|56311.0|||T|N|
ZPT|0000475656|1||1|20160302153151
026|not-even-valid|Q|
030|garbage
ZPT|9999999999|42|||";
    let outcome = FlowFileParser::new().parse_content(content);

    // Lines after the footer produce no groups, no errors, and never
    // overwrite the footer
    assert!(outcome.is_committable());
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.footer.as_ref().unwrap().file_identifier, "0000475656");
    assert_eq!(outcome.stats.lines_read, 3);
}

#[test]
fn missing_footer_still_flushes_the_last_group() {
    let content = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|V|
030|01|20160222000000|56311.0|||T|N|";
    let outcome = FlowFileParser::new().parse_content(content);

    assert_eq!(outcome.groups.len(), 1);
    assert!(outcome.footer.is_none());
    // Groups survive, file metadata does not
    assert!(outcome.is_committable());
    assert!(outcome.metadata().is_none());
}

#[test]
fn metadata_requires_both_header_and_footer() {
    let outcome = FlowFileParser::new().parse_content(VALID_SINGLE_READING);
    let metadata = outcome.metadata().unwrap();
    assert_eq!(metadata.header_format, "ZHV");
    assert_eq!(metadata.footer_format, "ZPT");
    assert_eq!(metadata.data_flow, "D0010");
    assert_eq!(metadata.data_flow_version, 2);
    assert_eq!(metadata.total_group_count, 1);
    assert_eq!(metadata.flow_count, Some(1));
    assert_eq!(
        metadata.file_created_at,
        Utc.with_ymd_and_hms(2016, 3, 2, 15, 31, 51).unwrap()
    );

    let headerless = FlowFileParser::new()
        .parse_content("026|1200023305967|V|\nZPT|0000475656|0|||");
    assert!(headerless.metadata().is_none());
}

#[test]
fn one_bad_field_makes_the_file_uncommittable_but_not_unscannable() {
    let content = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|X|
030|01|20160222000000|56311.0|||T|N|
ZPT|0000475656|1||1|20160302153151";
    let outcome = FlowFileParser::new().parse_content(content);

    assert!(!outcome.is_committable());
    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.line, 2);
    assert_eq!(error.tag, "026");
    assert!(matches!(
        error.source,
        FieldError::FieldEnumInvalid { field: "bsc_validation_status", .. }
    ));

    // The scan kept going: later rows were parsed and grouped
    assert_eq!(outcome.groups.len(), 1);
    assert!(outcome.footer.is_some());
}

#[test]
fn every_bad_row_is_surfaced_in_one_pass() {
    let content = "\
026|1200023305967|X|
030|01|banana|not_a_number|||T|N|
ZPT|0000475656|1|||";
    let outcome = FlowFileParser::new().parse_content(content);

    assert_eq!(outcome.errors.len(), 3);
    assert_eq!(outcome.stats.rows_failed, 2);
    let fields: Vec<_> = outcome.errors.iter().map(|e| e.source.field()).collect();
    assert_eq!(
        fields,
        vec!["bsc_validation_status", "reading_at", "register_reading"]
    );
}

#[test]
fn empty_content_yields_an_empty_committable_outcome() {
    let outcome = FlowFileParser::new().parse_content("");
    assert!(outcome.is_committable());
    assert!(outcome.groups.is_empty());
    assert!(outcome.header.is_none());
    assert!(outcome.footer.is_none());
}
