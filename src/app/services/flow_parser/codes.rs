//! Closed code catalogues from the D0010 data dictionary
//!
//! Record fields that carry market codes are validated against these fixed
//! tables. Each table pairs the wire code with its published description so
//! the CLI can surface human-readable catalogues.

/// J0024 site visit check codes, as carried by 027/029/033 records
pub const SITE_VISIT_REASONS: &[(&str, &str)] = &[
    ("01", "Site occupied"),
    ("02", "Site not occupied"),
    ("03", "Meter system energised"),
    ("04", "Meter system de-energised"),
    ("05", "Equipment/meter damage"),
    ("06", "Suspected tampering"),
    ("07", "Timeswitch stopped"),
    ("08", "Phase/fuse failure"),
    ("09", "Consumption detected on de-energised meter"),
    ("10", "Change of meter"),
    ("11", "Zero reading on MD register"),
    ("13", "MD register on full scale"),
    ("14", "More than 1 MD register reset"),
    ("15", "Meter stopped"),
    ("16", "Seals damaged"),
    ("17", "Seals missing"),
    ("18", "Unsafe premises"),
    ("19", "Call not made on routine visit"),
    ("20", "No access"),
    ("21", "Refused access"),
    ("22", "Meter blocked"),
    ("23", "Wiring dangerous or incomplete"),
    ("24", "Token Meter Reset"),
    ("25", "Token Meter Not Reset"),
    ("26", "Agent failed to keep appointment"),
    (
        "27",
        "Meter reading modified manually by NHHDC in accordance with BSCPs -site visit not required.",
    ),
    ("28", "Unable to gain access due to Insufficient address details"),
    ("29", "Customer unable to provide access"),
    ("30", "Unable to gain access to HV environment"),
    ("31", "Interrogation port unavailable (HH only)"),
    ("32", "Wrong meter/outstation password (HH only)"),
    ("33", "Handheld failure (HH only)"),
    ("34", "Suspected demolished"),
    ("35", "Demolished"),
    ("36", "Change of occupier"),
    ("37", "Unmanned"),
    ("38", "Unable to gain access due to key/code being unavailable"),
    ("39", "Unable to locate meter at property"),
    ("40", "Suspected Energised"),
    ("41", "Suspected De-energised"),
    ("42", "Site capable of exporting energy"),
    ("43", "Supply remotely disabled"),
    ("44", "Supply remotely re-armed"),
    ("50", "Category A Network Defect Reported"),
    ("51", "Category B Network Defect Reported"),
    ("52", "Additional equipment required"),
    ("53", "Unable to establish WAN"),
    ("54", "Unable to establish HAN"),
    ("55", "Insufficient space for new meter installation"),
    ("56", "Unable to access due to parking restrictions"),
    (
        "57",
        "Unable to complete installation due to adverse weather conditions",
    ),
    (
        "58",
        "Unable to complete installation due to height/position of meter",
    ),
    ("88", "Request rejected"),
    ("89", "Fault resolution completion report"),
];

/// J0171 meter reading type codes, as carried by 028 records
pub const READING_TYPES: &[(&str, &str)] = &[
    ("A", "Actual Change of Supplier Read"),
    ("C", "Customer own read"),
    (
        "D",
        "Deemed (Settlement Registers) or Estimated (Non-Settlement Registers)",
    ),
    ("F", "Final"),
    ("I", "Initial"),
    ("M", "MAR"),
    ("O", "Old Supplier's Estimated CoS Reading"),
    ("P", "Electronically collected via PPMIP"),
    ("Q", "Meter Reading modified manually by DC"),
    ("R", "Routine"),
    ("S", "Special"),
    ("T", "Proving Test Reading"),
    ("U", "Forward Migration CoA"),
    ("V", "Forward Migration CoS"),
    ("W", "Withdrawn"),
    ("X", "Supplier Agreed Switch Read"),
    ("Y", "Reverse Migration CoS"),
    ("Z", "Actual Change of Tenancy Read"),
];

/// Validation failure reason codes, as carried by 032 records
pub const VALIDATION_REASONS: &[(&str, &str)] = &[
    ("01", "MSID Incorrect"),
    ("02", "Reading Dates"),
    ("03", "Negative Consumption"),
    ("04", "Inconsistent with slave register advance"),
    ("05", "Consumption exceeds twice expected advance"),
    ("06", "Meter incorrectly energised"),
    ("07", "Meter incorrectly de-energised"),
    ("08", "Full Scale MD"),
    ("09", "Zero MD"),
    ("10", "Number of MD resets >1"),
    ("11", "Number of register digits incorrect"),
    ("12", "Inconsistent register read date"),
    ("13", "Faulty Meter"),
    ("14", "Hand Held Read Failure"),
    ("15", "Meter Not on Site/Metering protocol not approved"),
    ("16", "Standing Data incorrect"),
    ("17", "No access to meter"),
    ("18", "Meter Time/Date reset"),
    ("19", "Outstation reset"),
    ("20", "Meter Change/Meter Maintenance"),
    ("21", "Phase Failure"),
    ("22", "Meters Recording Zeros"),
    ("23", "Test Data Recorded"),
    ("24", "Data Lapse"),
    ("25", "Actual Data Manually Keyed"),
    ("26", "Invalid Zero Advances"),
    ("27", "Zero Consumption"),
];

/// Look up the description for a site visit reason code
pub fn site_visit_reason(code: &str) -> Option<&'static str> {
    lookup(SITE_VISIT_REASONS, code)
}

/// Look up the description for a meter reading type code
pub fn reading_type(code: &str) -> Option<&'static str> {
    lookup(READING_TYPES, code)
}

/// Look up the description for a validation failure reason code
pub fn validation_reason(code: &str) -> Option<&'static str> {
    lookup(VALIDATION_REASONS, code)
}

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_descriptions() {
        assert_eq!(site_visit_reason("01"), Some("Site occupied"));
        assert_eq!(site_visit_reason("89"), Some("Fault resolution completion report"));
        assert_eq!(reading_type("R"), Some("Routine"));
        assert_eq!(validation_reason("27"), Some("Zero Consumption"));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        // 12 and 99 are absent from the J0024 set
        assert_eq!(site_visit_reason("12"), None);
        assert_eq!(site_visit_reason("99"), None);
        assert_eq!(reading_type("B"), None);
        assert_eq!(validation_reason("28"), None);
    }
}
