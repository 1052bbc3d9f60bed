//! Spreadsheet tab layouts.
//!
//! Each form variant owns one tab in the shared spreadsheet. The header
//! list here is the authoritative column schema: row builders and the
//! formatting requests sent at tab-provisioning time are both derived
//! from it, and a drift test pins every row builder to its header
//! count.

/// Status values offered in the status column's dropdown.
pub const STATUS_OPTIONS: &[&str] = &["New", "Contacted", "In Progress", "Closed"];

/// The status every freshly appended lead row carries.
pub const STATUS_NEW: &str = "New";

/// Layout of one spreadsheet tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSchema {
    /// Tab title; appends address the tab by this name.
    pub tab_title: &'static str,
    /// Header row, in column order.
    pub headers: &'static [&'static str],
    /// Pixel widths applied per column when the tab is provisioned.
    pub column_widths: &'static [i64],
    /// Zero-based index of the status column, when the tab has one.
    pub status_column: Option<usize>,
}

pub const AMBASSADOR_SHEET: SheetSchema = SheetSchema {
    tab_title: "Ambassadors",
    headers: &[
        "Submitted At",
        "Status",
        "Full Name",
        "Email",
        "Phone",
        "Languages",
        "Postal Code",
        "Current Study",
        "Destination",
        "Motivation",
        "Social Link",
        "CV Status",
    ],
    column_widths: &[150, 110, 180, 220, 140, 160, 110, 150, 120, 400, 220, 110],
    status_column: Some(1),
};

pub const CONSULTATION_SHEET: SheetSchema = SheetSchema {
    tab_title: "Consultations",
    headers: &[
        "Submitted At",
        "Status",
        "Full Name",
        "Email",
        "Phone",
        "Education Level",
        "Grades",
        "Destination",
        "Intake",
        "Course Interest",
        "Budget",
        "Message",
    ],
    column_widths: &[150, 110, 180, 220, 140, 150, 140, 120, 110, 180, 130, 400],
    status_column: Some(1),
};

pub const IELTS_SHEET: SheetSchema = SheetSchema {
    tab_title: "IELTS Registrations",
    headers: &[
        "Submitted At",
        "Status",
        "Full Name",
        "Email",
        "Phone",
        "Class Type",
        "Target Band",
    ],
    column_widths: &[150, 110, 180, 220, 140, 120, 110],
    status_column: Some(1),
};

pub const SUBSCRIBER_SHEET: SheetSchema = SheetSchema {
    tab_title: "Subscribers",
    headers: &["Submitted At", "Email"],
    column_widths: &[150, 260],
    status_column: None,
};

/// Every tab schema, for provisioning and drift checks.
pub const ALL_SHEETS: &[&SheetSchema] = &[
    &AMBASSADOR_SHEET,
    &CONSULTATION_SHEET,
    &IELTS_SHEET,
    &SUBSCRIBER_SHEET,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_headers() {
        for schema in ALL_SHEETS {
            assert_eq!(
                schema.headers.len(),
                schema.column_widths.len(),
                "width count drifted for tab {}",
                schema.tab_title
            );
        }
    }

    #[test]
    fn status_column_points_at_status_header() {
        for schema in ALL_SHEETS {
            if let Some(index) = schema.status_column {
                assert_eq!(schema.headers[index], "Status", "tab {}", schema.tab_title);
            }
        }
    }

    #[test]
    fn tab_titles_are_unique() {
        let mut titles: Vec<_> = ALL_SHEETS.iter().map(|s| s.tab_title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), ALL_SHEETS.len());
    }

    #[test]
    fn new_status_is_an_offered_option() {
        assert!(STATUS_OPTIONS.contains(&STATUS_NEW));
    }
}
