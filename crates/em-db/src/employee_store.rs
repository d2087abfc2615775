//! Employee snapshot loading.

use crate::error::DbResult;
use crate::rows::Row;
use crate::traits::Database;
use em_core::EmployeeRow;
use em_sql::writeback::select_current;

fn employee_from_row(row: Row<'_>) -> EmployeeRow {
    EmployeeRow {
        employee_id: row.parse_opt("EMPLOYEE_ID"),
        first_name: row.text("FIRST_NAME"),
        last_name: row.text("LAST_NAME"),
        email: row.text("EMAIL"),
        department: row.text("DEPARTMENT"),
        function: row.text("FUNCTION"),
        title: row.text("TITLE"),
        location: row.text("LOCATION"),
        manager_email: row.text("MANAGER_EMAIL"),
        hire_date: row.text("HIRE_DATE"),
        active: row.flag("ACTIVE", true),
        skills: row.text("SKILLS"),
        resume_url: row.text("RESUME_URL"),
        employee_uid: row.text("EMPLOYEE_UID"),
        version_number: row.int("VERSION_NUMBER", 1),
        is_current: row.flag("IS_CURRENT", true),
    }
}

/// Current version of every employee, ordered by last then first name.
pub async fn load_current(db: &dyn Database) -> DbResult<Vec<EmployeeRow>> {
    let rows = db.query(&select_current()).await?;
    Ok(rows.iter().map(employee_from_row).collect())
}
