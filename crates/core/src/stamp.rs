//! Submission timestamps.
//!
//! Rows are stamped in the consultancy's reporting timezone (UTC+06:30)
//! regardless of where the service runs, so the sheet reads in local
//! office time.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset of the reporting timezone from UTC, in seconds.
const REPORTING_OFFSET_SECS: i32 = 6 * 3600 + 1800;

fn reporting_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORTING_OFFSET_SECS).expect("offset in range")
}

/// Format an instant as the sheet's "Submitted At" cell.
pub fn submission_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&reporting_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_reporting_timezone() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(submission_timestamp(utc), "2024-03-01 16:30:00");
    }

    #[test]
    fn crosses_date_boundary_with_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(submission_timestamp(utc), "2025-01-01 02:30:00");
    }
}
