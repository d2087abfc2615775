//! Employee reference rows edited by the write-back tool.
//!
//! A row in `HRDEMO.EMPLOYEES` is one *version* of an employee:
//! `EMPLOYEE_ID` identifies the row, `EMPLOYEE_UID` the employee across
//! versions, and at most one version per `EMPLOYEE_UID` has
//! `IS_CURRENT = TRUE`.

use crate::ids::EmployeeId;
use crate::serde_helpers::{default_true, default_version, lenient_bool, lenient_version};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Column order of the employee grid, as loaded from the warehouse.
pub const EMPLOYEE_COLUMNS: &[&str] = &[
    "EMPLOYEE_ID",
    "FIRST_NAME",
    "LAST_NAME",
    "EMAIL",
    "DEPARTMENT",
    "FUNCTION",
    "TITLE",
    "LOCATION",
    "MANAGER_EMAIL",
    "HIRE_DATE",
    "ACTIVE",
    "SKILLS",
    "RESUME_URL",
    "EMPLOYEE_UID",
    "VERSION_NUMBER",
    "IS_CURRENT",
];

/// One row of the employee grid.
///
/// Text cells are kept as entered; comparisons and writes trim them.
/// `hire_date` stays raw text so that reformatted dates can be compared
/// by calendar day rather than by spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    #[serde(rename = "EMPLOYEE_ID", default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(rename = "FIRST_NAME", default)]
    pub first_name: String,
    #[serde(rename = "LAST_NAME", default)]
    pub last_name: String,
    #[serde(rename = "EMAIL", default)]
    pub email: String,
    #[serde(rename = "DEPARTMENT", default)]
    pub department: String,
    #[serde(rename = "FUNCTION", default)]
    pub function: String,
    #[serde(rename = "TITLE", default)]
    pub title: String,
    #[serde(rename = "LOCATION", default)]
    pub location: String,
    #[serde(rename = "MANAGER_EMAIL", default)]
    pub manager_email: String,
    #[serde(rename = "HIRE_DATE", default)]
    pub hire_date: String,
    #[serde(rename = "ACTIVE", deserialize_with = "lenient_bool", default = "default_true")]
    pub active: bool,
    #[serde(rename = "SKILLS", default)]
    pub skills: String,
    #[serde(rename = "RESUME_URL", default)]
    pub resume_url: String,
    #[serde(rename = "EMPLOYEE_UID", default)]
    pub employee_uid: String,
    #[serde(
        rename = "VERSION_NUMBER",
        deserialize_with = "lenient_version",
        default = "default_version"
    )]
    pub version_number: i64,
    #[serde(rename = "IS_CURRENT", deserialize_with = "lenient_bool", default = "default_true")]
    pub is_current: bool,
}

impl Default for EmployeeRow {
    fn default() -> Self {
        Self {
            employee_id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            department: String::new(),
            function: String::new(),
            title: String::new(),
            location: String::new(),
            manager_email: String::new(),
            hire_date: String::new(),
            active: true,
            skills: String::new(),
            resume_url: String::new(),
            employee_uid: String::new(),
            version_number: 1,
            is_current: true,
        }
    }
}

impl EmployeeRow {
    /// Hire date parsed leniently; unparseable text yields `None`.
    pub fn hire_date(&self) -> Option<NaiveDate> {
        parse_lenient_date(&self.hire_date)
    }

    /// True when HIRE_DATE holds text that is not a date.
    pub fn has_invalid_hire_date(&self) -> bool {
        !self.hire_date.trim().is_empty() && self.hire_date().is_none()
    }

    /// The text fields compared by the diff engine, paired with their column.
    pub fn tracked_text_fields(&self) -> [(&'static str, &str); 10] {
        [
            ("FIRST_NAME", &self.first_name),
            ("LAST_NAME", &self.last_name),
            ("EMAIL", &self.email),
            ("DEPARTMENT", &self.department),
            ("FUNCTION", &self.function),
            ("TITLE", &self.title),
            ("LOCATION", &self.location),
            ("MANAGER_EMAIL", &self.manager_email),
            ("SKILLS", &self.skills),
            ("RESUME_URL", &self.resume_url),
        ]
    }

    /// Display label used by selection prompts.
    pub fn label(&self) -> String {
        format!(
            "{} {} - {}",
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim()
        )
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
];

/// Parse a date cell in any of the common spellings.
///
/// Timestamps are truncated to their calendar day. Blank or unparseable text
/// yields `None`.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_date_spellings() {
        let expected = NaiveDate::from_ymd_opt(2021, 6, 1);
        assert_eq!(parse_lenient_date("2021-06-01"), expected);
        assert_eq!(parse_lenient_date("2021/06/01"), expected);
        assert_eq!(parse_lenient_date("06/01/2021"), expected);
        assert_eq!(parse_lenient_date("2021-06-01 00:00:00"), expected);
        assert_eq!(parse_lenient_date("2021-06-01T13:45:00"), expected);
    }

    #[test]
    fn test_parse_lenient_date_rejects_junk() {
        assert_eq!(parse_lenient_date(""), None);
        assert_eq!(parse_lenient_date("soon"), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ann.Lee@Example.COM "), "ann.lee@example.com");
    }

    #[test]
    fn test_label() {
        let row = EmployeeRow {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            ..Default::default()
        };
        assert_eq!(row.label(), "Ann Lee - ann@example.com");
    }
}
