//! Field codec tests: one constraint, one typed value or one error

use chrono::{TimeZone, Utc};

use crate::app::services::flow_parser::codec::{self, FieldError};

#[test]
fn literal_accepts_any_listed_tag() {
    assert_eq!(
        codec::literal(Some("ZHV"), "header_format", "ZHV/ZHF").unwrap(),
        "ZHV"
    );
    assert_eq!(
        codec::literal(Some("ZHF"), "header_format", "ZHV/ZHF").unwrap(),
        "ZHF"
    );
}

#[test]
fn literal_mismatch_is_a_hard_error() {
    let err = codec::literal(Some("ZPT"), "header_format", "ZHV/ZHF").unwrap_err();
    assert!(matches!(err, FieldError::SchemaMismatch { field: "header_format", .. }));
}

#[test]
fn bounded_rejects_rather_than_truncates() {
    assert_eq!(
        codec::bounded(Some("1200023305967"), "mpan_core", 13).unwrap(),
        "1200023305967"
    );
    let err = codec::bounded(Some("12000233059671"), "mpan_core", 13).unwrap_err();
    assert_eq!(
        err,
        FieldError::FieldTooLong {
            field: "mpan_core",
            value: "12000233059671".to_string(),
            max_len: 13,
        }
    );
}

#[test]
fn bounded_requires_the_field_to_be_present() {
    let err = codec::bounded(None, "mpan_core", 13).unwrap_err();
    assert_eq!(err, FieldError::RowTooShort { field: "mpan_core" });
}

#[test]
fn optional_bounded_defaults_missing_trailing_fields_to_empty() {
    assert_eq!(codec::optional_bounded(None, "broadcast", 1).unwrap(), "");
    assert_eq!(codec::optional_bounded(Some(""), "broadcast", 1).unwrap(), "");
}

#[test]
fn coded_rejects_values_outside_the_catalogue() {
    let decode = |s: &str| (s == "T").then_some(true);
    assert_eq!(codec::coded(Some("T"), "flag", "flag", decode).unwrap(), true);
    let err = codec::coded(Some("X"), "flag", "flag", decode).unwrap_err();
    assert!(matches!(err, FieldError::FieldEnumInvalid { field: "flag", .. }));
}

#[test]
fn optional_coded_maps_empty_to_absent() {
    let decode = |s: &str| (s == "T").then_some(true);
    assert_eq!(codec::optional_coded(Some(""), "flag", "flag", decode).unwrap(), None);
    assert_eq!(codec::optional_coded(None, "flag", "flag", decode).unwrap(), None);
    assert_eq!(
        codec::optional_coded(Some("T"), "flag", "flag", decode).unwrap(),
        Some(true)
    );
}

#[test]
fn optional_int_maps_empty_to_absent_and_parses_otherwise() {
    assert_eq!(codec::optional_int(Some(""), "checksum").unwrap(), None);
    assert_eq!(codec::optional_int(Some("42"), "checksum").unwrap(), Some(42));
    assert!(codec::optional_int(Some("4x2"), "checksum").is_err());
}

#[test]
fn optional_int_below_enforces_the_strict_bound() {
    assert_eq!(
        codec::optional_int_below(Some("10"), "number_of_md_resets", 999).unwrap(),
        Some(10)
    );
    assert_eq!(
        codec::optional_int_below(Some(""), "number_of_md_resets", 999).unwrap(),
        None
    );
    assert!(codec::optional_int_below(Some("999"), "number_of_md_resets", 999).is_err());
    assert!(codec::optional_int_below(Some("1000"), "number_of_md_resets", 999).is_err());
}

#[test]
fn optional_int_below_names_its_bound_in_the_error() {
    let err = codec::optional_int_below(Some("50"), "number_of_md_resets", 50).unwrap_err();
    assert_eq!(
        err.to_string(),
        "number_of_md_resets: '50' is not a valid integer below 50"
    );
}

#[test]
fn float_parse_failure_is_not_coerced_to_zero() {
    assert_eq!(codec::float(Some("12345.67"), "register_reading").unwrap(), 12345.67);
    let err = codec::float(Some("invalid_float"), "register_reading").unwrap_err();
    assert!(matches!(
        err,
        FieldError::FieldFormatInvalid { field: "register_reading", .. }
    ));
}

#[test]
fn timestamp_round_trip_yields_the_utc_instant() {
    let parsed = codec::timestamp(Some("20160302154650"), "reading_at").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 3, 2, 15, 46, 50).unwrap());
}

#[test]
fn timestamp_accepts_only_the_packed_format() {
    assert!(codec::timestamp(Some("20231101"), "reading_at").is_err());
    assert!(codec::timestamp(Some("2023-11-01 00:00"), "reading_at").is_err());
    // 13 digits: chrono alone would tolerate a one-digit seconds field
    assert!(codec::timestamp(Some("2023110100000"), "reading_at").is_err());
    assert!(codec::timestamp(Some(""), "reading_at").is_err());
}

#[test]
fn optional_timestamp_empty_is_absent_not_epoch() {
    assert_eq!(codec::optional_timestamp(Some(""), "md_reset_at").unwrap(), None);
    assert_eq!(codec::optional_timestamp(None, "md_reset_at").unwrap(), None);
    assert_eq!(
        codec::optional_timestamp(Some("20231001000000"), "md_reset_at").unwrap(),
        Some(Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap())
    );
    assert!(codec::optional_timestamp(Some("20231101"), "md_reset_at").is_err());
}
