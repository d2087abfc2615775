//! Statements for versioned employee write-back.
//!
//! Business fields are never updated in place. An edit retires the current
//! version and inserts a new one; a delete archives the current version.
//! Retiring always matches the version the editor was loaded with, so a
//! concurrent edit shows up as zero affected rows.

use em_core::employee::normalize_email;
use em_core::{EmployeeId, EmployeeRow, SqlValue, Statement};

/// Fully-qualified employee table.
pub const EMPLOYEE_TABLE: &str = "HRDEMO.EMPLOYEES";

/// Columns written for every new version, in parameter order.
const BUSINESS_COLUMNS: &str = "FIRST_NAME, LAST_NAME, EMAIL, DEPARTMENT, \"FUNCTION\", TITLE, \
     LOCATION, MANAGER_EMAIL, HIRE_DATE, ACTIVE, SKILLS, RESUME_URL";

const BUSINESS_PLACEHOLDERS: &str = "?, ?, ?, ?, ?, ?, ?, ?, CAST(? AS DATE), ?, ?, ?";

/// Current versions, ordered for display.
pub fn select_current() -> Statement {
    Statement::raw(format!(
        "SELECT EMPLOYEE_ID, FIRST_NAME, LAST_NAME, EMAIL, DEPARTMENT, \"FUNCTION\", TITLE, \
         LOCATION, MANAGER_EMAIL, CAST(HIRE_DATE AS VARCHAR) AS HIRE_DATE, ACTIVE, SKILLS, \
         RESUME_URL, EMPLOYEE_UID, VERSION_NUMBER, IS_CURRENT \
         FROM {EMPLOYEE_TABLE} WHERE IS_CURRENT = TRUE ORDER BY LAST_NAME, FIRST_NAME"
    ))
}

/// Archive the current version of a deleted employee.
pub fn archive(id: &EmployeeId, version: i64, actor: &str) -> Statement {
    Statement::new(
        format!(
            "UPDATE {EMPLOYEE_TABLE} SET IS_CURRENT = FALSE, \
             DELETE_USER = ?, DELETE_DATE_TIME = CURRENT_TIMESTAMP, \
             UPDATE_USER = ?, UPDATE_DATE_TIME = CURRENT_TIMESTAMP \
             WHERE EMPLOYEE_ID = ? AND IS_CURRENT = TRUE AND VERSION_NUMBER = ?"
        ),
        vec![
            actor.into(),
            actor.into(),
            id.as_str().into(),
            version.into(),
        ],
    )
}

/// Retire the current version ahead of inserting its successor.
pub fn retire(id: &EmployeeId, version: i64, actor: &str) -> Statement {
    Statement::new(
        format!(
            "UPDATE {EMPLOYEE_TABLE} SET IS_CURRENT = FALSE, \
             UPDATE_USER = ?, UPDATE_DATE_TIME = CURRENT_TIMESTAMP \
             WHERE EMPLOYEE_ID = ? AND IS_CURRENT = TRUE AND VERSION_NUMBER = ?"
        ),
        vec![actor.into(), id.as_str().into(), version.into()],
    )
}

/// Insert a current version of `row`.
///
/// With `uid` the row continues an existing employee; without it the
/// warehouse assigns a fresh `EMPLOYEE_UID`. `EMPLOYEE_ID` is always
/// assigned by the warehouse.
pub fn insert_version(row: &EmployeeRow, uid: Option<&str>, version: i64, actor: &str) -> Statement {
    let mut params: Vec<SqlValue> = Vec::with_capacity(16);
    let (uid_column, uid_placeholder) = match uid {
        Some(uid) => {
            params.push(uid.into());
            ("EMPLOYEE_UID, ", "?, ")
        }
        None => ("", ""),
    };
    params.push(version.into());
    params.extend(business_values(row));
    params.push(actor.into());

    Statement::new(
        format!(
            "INSERT INTO {EMPLOYEE_TABLE} ({uid_column}VERSION_NUMBER, IS_CURRENT, \
             {BUSINESS_COLUMNS}, UPDATE_USER, UPDATE_DATE_TIME) \
             VALUES ({uid_placeholder}?, TRUE, {BUSINESS_PLACEHOLDERS}, ?, CURRENT_TIMESTAMP)"
        ),
        params,
    )
}

/// Bound values for [`BUSINESS_COLUMNS`]: trimmed text, normalized emails,
/// the hire date as ISO text (or `NULL`), and the active flag.
fn business_values(row: &EmployeeRow) -> Vec<SqlValue> {
    let text = |value: &str| SqlValue::Text(value.trim().to_string());
    vec![
        text(&row.first_name),
        text(&row.last_name),
        SqlValue::Text(normalize_email(&row.email)),
        text(&row.department),
        text(&row.function),
        text(&row.title),
        text(&row.location),
        SqlValue::Text(normalize_email(&row.manager_email)),
        row.hire_date()
            .map(|d| SqlValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(SqlValue::Null),
        SqlValue::Bool(row.active),
        text(&row.skills),
        text(&row.resume_url),
    ]
}

#[cfg(test)]
#[path = "writeback_test.rs"]
mod tests;
