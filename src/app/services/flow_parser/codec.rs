//! Field-level decoding for D0010 records
//!
//! Every raw field is decoded against exactly one constraint from this
//! module, producing either a typed value or a [`FieldError`] naming the
//! field and the violated constraint. The decoders never repair input:
//! over-long strings are rejected rather than truncated, unparsable numbers
//! are errors rather than zero, and only fields explicitly marked optional
//! may be empty.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::{TIMESTAMP_FORMAT, TIMESTAMP_LEN};

/// A single field-level validation failure
///
/// These are accumulated per row and evaluated in aggregate after the file
/// scan; a field error never aborts parsing of the remaining fields or rows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Literal-tag field does not match its expected constant
    #[error("{field}: expected {expected}, got '{value}'")]
    SchemaMismatch {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    /// String field exceeds its maximum length
    #[error("{field}: '{value}' is longer than {max_len} characters")]
    FieldTooLong {
        field: &'static str,
        value: String,
        max_len: usize,
    },

    /// Value is not a member of the field's closed code catalogue
    #[error("{field}: '{value}' is not a valid {catalogue} code")]
    FieldEnumInvalid {
        field: &'static str,
        value: String,
        catalogue: &'static str,
    },

    /// Value does not parse under the field's required format
    #[error("{field}: '{value}' is not a valid {expected}")]
    FieldFormatInvalid {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Required field is missing from the row entirely
    #[error("{field}: required field missing from row")]
    RowTooShort { field: &'static str },
}

impl FieldError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::SchemaMismatch { field, .. }
            | Self::FieldTooLong { field, .. }
            | Self::FieldEnumInvalid { field, .. }
            | Self::FieldFormatInvalid { field, .. }
            | Self::RowTooShort { field } => field,
        }
    }
}

/// Decode a literal-tag field that must equal `expected` exactly
pub fn literal(
    value: Option<&str>,
    field: &'static str,
    expected: &'static str,
) -> Result<String, FieldError> {
    let value = required(value, field)?;
    if expected.split('/').any(|tag| tag == value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::SchemaMismatch {
            field,
            expected,
            value: value.to_string(),
        })
    }
}

/// Decode a mandatory string field with a maximum length
pub fn bounded(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> Result<String, FieldError> {
    let value = required(value, field)?;
    check_len(value, field, max_len)?;
    Ok(value.to_string())
}

/// Decode an optional string field with a maximum length
///
/// A missing trailing field decodes to the empty string, matching the
/// positional-zip rule for rows shorter than their schema.
pub fn optional_bounded(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> Result<String, FieldError> {
    let value = value.unwrap_or("");
    check_len(value, field, max_len)?;
    Ok(value.to_string())
}

/// Decode a mandatory field whose value must belong to a closed catalogue
///
/// `decode` maps a catalogue member to its typed value and returns `None`
/// for anything outside the set.
pub fn coded<T>(
    value: Option<&str>,
    field: &'static str,
    catalogue: &'static str,
    decode: impl Fn(&str) -> Option<T>,
) -> Result<T, FieldError> {
    let value = required(value, field)?;
    decode(value).ok_or_else(|| FieldError::FieldEnumInvalid {
        field,
        value: value.to_string(),
        catalogue,
    })
}

/// Decode an optional catalogue field where the empty string means absent
pub fn optional_coded<T>(
    value: Option<&str>,
    field: &'static str,
    catalogue: &'static str,
    decode: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, FieldError> {
    match value.unwrap_or("") {
        "" => Ok(None),
        value => decode(value)
            .map(Some)
            .ok_or_else(|| FieldError::FieldEnumInvalid {
                field,
                value: value.to_string(),
                catalogue,
            }),
    }
}

/// Decode a mandatory unsigned integer field
pub fn int(value: Option<&str>, field: &'static str) -> Result<u32, FieldError> {
    let value = required(value, field)?;
    value
        .parse::<u32>()
        .map_err(|_| format_invalid(field, value, "integer"))
}

/// Decode an optional signed integer field; empty means absent
pub fn optional_int(value: Option<&str>, field: &'static str) -> Result<Option<i64>, FieldError> {
    match value.unwrap_or("") {
        "" => Ok(None),
        value => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format_invalid(field, value, "integer")),
    }
}

/// Decode an optional unsigned integer field strictly below `bound`
pub fn optional_int_below(
    value: Option<&str>,
    field: &'static str,
    bound: u16,
) -> Result<Option<u16>, FieldError> {
    match value.unwrap_or("") {
        "" => Ok(None),
        value => match value.parse::<u16>() {
            Ok(parsed) if parsed < bound => Ok(Some(parsed)),
            _ => Err(format_invalid(field, value, format!("integer below {bound}"))),
        },
    }
}

/// Decode a mandatory floating-point field by direct numeric parse
pub fn float(value: Option<&str>, field: &'static str) -> Result<f64, FieldError> {
    let value = required(value, field)?;
    value
        .parse::<f64>()
        .map_err(|_| format_invalid(field, value, "number"))
}

/// Decode a mandatory packed `YYYYMMDDHHMMSS` timestamp as a UTC instant
pub fn timestamp(value: Option<&str>, field: &'static str) -> Result<DateTime<Utc>, FieldError> {
    let value = required(value, field)?;
    parse_timestamp(value).ok_or_else(|| format_invalid(field, value, "YYYYMMDDHHMMSS timestamp"))
}

/// Decode an optional packed timestamp; the empty string decodes to absent
pub fn optional_timestamp(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, FieldError> {
    match value.unwrap_or("") {
        "" => Ok(None),
        value => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| format_invalid(field, value, "YYYYMMDDHHMMSS timestamp")),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    // Exactly 14 characters: chrono would otherwise tolerate short
    // numeric runs like "2023110100000"
    if value.len() != TIMESTAMP_LEN {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, FieldError> {
    value.ok_or(FieldError::RowTooShort { field })
}

fn check_len(value: &str, field: &'static str, max_len: usize) -> Result<(), FieldError> {
    if value.chars().count() > max_len {
        Err(FieldError::FieldTooLong {
            field,
            value: value.to_string(),
            max_len,
        })
    } else {
        Ok(())
    }
}

fn format_invalid(field: &'static str, value: &str, expected: impl Into<String>) -> FieldError {
    FieldError::FieldFormatInvalid {
        field,
        value: value.to_string(),
        expected: expected.into(),
    }
}
