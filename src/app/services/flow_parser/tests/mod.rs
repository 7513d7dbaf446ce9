//! Shared fixtures for the flow parser test modules

use super::row::Row;

mod codec_tests;
mod parser_tests;

/// Split a raw line into a row on line 1
pub fn row(raw: &str) -> Row<'_> {
    Row::split(1, raw)
}

/// A complete, valid single-reading flow file
pub const VALID_SINGLE_READING: &str = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|V|
028|F75A 00802|D|
030|01|20160222000000|56311.0|||T|N|
ZPT|0000475656|1||1|20160302153151";

/// Two meters, the second carrying Day and Night registers
pub const TWO_METERS_THREE_READINGS: &str = "\
ZHV|0000475656|D0010002|X|UKDC|Z|UKDC|20160302153151||||OPER|
026|1200023305967|V|
027|01|Dog in garden|
028|F75A 00802|D|
030|01|20160222000000|56311.0|||T|N|
026|1900001059816|V|
028|D13C 00847|C|
030|D|20160221000000|3228.0|||T|N|
032|03|F|
030|N|20160221000000|1044.0|||T|N|
ZPT|0000475656|3||1|20160302153151";
