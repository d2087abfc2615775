//! Validation of an edited employee grid before it is saved.
//!
//! Errors are row-scoped and block the save. Row numbers are 1-based, in grid
//! order.

use crate::diff::Diffable;
use crate::employee::{normalize_email, EmployeeRow};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Maximum length of the free-text skills cell.
pub const MAX_SKILLS_LEN: usize = 500;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[\w.-]+(?:/[\w\-./?%&=]*)?$").expect("valid url regex")
});

/// What is wrong with a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    Required(&'static str),
    InvalidEmail(String),
    DuplicateEmail(String),
    InvalidUrl,
    InvalidDate(String),
    SkillsTooLong,
}

/// A validation failure tied to one grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based row number.
    pub row: usize,
    pub problem: RowProblem,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: ", self.row)?;
        match &self.problem {
            RowProblem::Required(column) => write!(f, "{column} is required"),
            RowProblem::InvalidEmail(email) => write!(f, "EMAIL '{email}' is invalid"),
            RowProblem::DuplicateEmail(email) => {
                write!(f, "duplicate EMAIL '{email}' in editor")
            }
            RowProblem::InvalidUrl => write!(f, "RESUME_URL must be a valid http(s) URL"),
            RowProblem::InvalidDate(raw) => write!(f, "HIRE_DATE '{raw}' is not a date"),
            RowProblem::SkillsTooLong => {
                write!(f, "SKILLS exceeds {MAX_SKILLS_LEN} characters")
            }
        }
    }
}

/// Validate every row of an edited grid.
///
/// Blank new rows are skipped but still counted, so row numbers match the
/// grid as read. Returns an empty vector when the grid may be saved.
pub fn validate_rows(rows: &[EmployeeRow]) -> Vec<RowError> {
    let mut errors = Vec::new();
    let mut emails: HashSet<String> = HashSet::new();

    for (idx, row) in rows.iter().enumerate() {
        if row.identity().is_none() && !row.has_content() {
            continue;
        }
        let mut push = |problem| errors.push(RowError { row: idx + 1, problem });

        if row.first_name.trim().is_empty() {
            push(RowProblem::Required("FIRST_NAME"));
        }
        if row.last_name.trim().is_empty() {
            push(RowProblem::Required("LAST_NAME"));
        }

        let email = normalize_email(&row.email);
        if email.is_empty() {
            push(RowProblem::Required("EMAIL"));
        } else if !EMAIL_RE.is_match(&email) {
            push(RowProblem::InvalidEmail(email));
        } else if emails.contains(&email) {
            push(RowProblem::DuplicateEmail(email));
        } else {
            emails.insert(email);
        }

        if row.has_invalid_hire_date() {
            push(RowProblem::InvalidDate(row.hire_date.trim().to_string()));
        }

        let resume_url = row.resume_url.trim();
        if !resume_url.is_empty() && !URL_RE.is_match(resume_url) {
            push(RowProblem::InvalidUrl);
        }
        if row.skills.trim().chars().count() > MAX_SKILLS_LEN {
            push(RowProblem::SkillsTooLong);
        }
    }

    errors
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
