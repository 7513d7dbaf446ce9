//! Parsing statistics for flow file scans

use serde::{Deserialize, Serialize};

/// Counters for one file scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines consumed before the footer (or end of input) stopped the scan
    pub lines_read: usize,

    /// Rows whose tag matched a known schema and decoded cleanly
    pub rows_parsed: usize,

    /// Rows skipped because their tag is not in the schema set
    pub rows_ignored: usize,

    /// Rows that produced at least one field error
    pub rows_failed: usize,

    /// Groups flushed by the accumulator
    pub groups_built: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of recognised rows that decoded cleanly, as a percentage
    pub fn success_rate(&self) -> f64 {
        let recognised = self.rows_parsed + self.rows_failed;
        if recognised == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / recognised as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_ignores_unrecognised_rows() {
        let stats = ParseStats {
            lines_read: 10,
            rows_parsed: 3,
            rows_ignored: 6,
            rows_failed: 1,
            groups_built: 1,
        };
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn success_rate_of_empty_scan_is_zero() {
        assert_eq!(ParseStats::new().success_rate(), 0.0);
    }
}
