//! Line classification and raw row splitting
//!
//! Each input line is split on the `|` delimiter into positional raw
//! fields. The first field is the record-type tag and selects the schema;
//! lines whose tag is not in the closed set are skipped without error so
//! that blank and trailing lines pass through harmlessly.

use crate::constants::FIELD_DELIMITER;

/// Record-type tags recognised by the D0010 schema set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTag {
    /// `ZHV` or `ZHF` file header
    Header,
    /// `026` MPAN core
    MpanCore,
    /// `027` site visit attached to the MPAN core
    MpanSiteVisit,
    /// `028` meter reading type
    MeterReadingType,
    /// `029` site visit attached to the meter reading
    MeterReadingSiteVisit,
    /// `030` register reading
    RegisterReading,
    /// `032` meter reading validation result
    ValidationResult,
    /// `033` site visit attached to the register reading
    RegisterSiteVisit,
    /// `ZPT` file footer
    Footer,
}

impl RecordTag {
    /// Classify a raw tag field; `None` means the line is ignored
    pub fn classify(raw: &str) -> Option<Self> {
        match raw {
            "ZHV" | "ZHF" => Some(Self::Header),
            "026" => Some(Self::MpanCore),
            "027" => Some(Self::MpanSiteVisit),
            "028" => Some(Self::MeterReadingType),
            "029" => Some(Self::MeterReadingSiteVisit),
            "030" => Some(Self::RegisterReading),
            "032" => Some(Self::ValidationResult),
            "033" => Some(Self::RegisterSiteVisit),
            "ZPT" => Some(Self::Footer),
            _ => None,
        }
    }
}

/// One raw line split into positional fields
///
/// Schemas read fields by position via [`Row::field`]; an index past the
/// end of the row yields `None`, which the codec's optional decoders map to
/// an absent value and the mandatory decoders report as a short row.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Split a raw line into a row, tagged with its 1-based line number
    pub fn split(line: usize, raw: &'a str) -> Self {
        Self {
            line,
            fields: raw.split(FIELD_DELIMITER).collect(),
        }
    }

    /// 1-based line number of this row within its file
    pub fn line(&self) -> usize {
        self.line
    }

    /// The raw record-type tag (first field)
    pub fn raw_tag(&self) -> &'a str {
        self.fields.first().copied().unwrap_or("")
    }

    /// Classify this row's tag against the known schema set
    pub fn tag(&self) -> Option<RecordTag> {
        RecordTag::classify(self.raw_tag())
    }

    /// Raw field at `index`, or `None` if the row is shorter than that
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// True for rows parsed from an empty line
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.is_empty())
    }
}
