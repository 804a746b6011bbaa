use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;
use tracing::{debug, instrument};

use super::report::{self, DailyReport, EmployeeHistory, PresentEntry};
use crate::config::AttendancePolicy;
use crate::error::{AppError, AppResult};
use crate::model::attendance::{Attendance, DailyAttendanceRow};
use crate::model::break_entry::BreakEntry;
use crate::model::employee::{Employee, EmployeeWithRole};

const EMPLOYEE_WITH_ROLE: &str = r#"
    SELECT e.id, e.name, e.email, e.in_time, d.role
    FROM employees e
    LEFT JOIN designations d ON d.id = e.designation_id
"#;

async fn fetch_employee(pool: &MySqlPool, employee_id: u64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, email, in_time, designation_id, role_company
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

#[instrument(skip(pool, policy))]
pub async fn daily_report(
    pool: &MySqlPool,
    day: NaiveDate,
    policy: &AttendancePolicy,
) -> AppResult<DailyReport> {
    let records = sqlx::query_as::<_, DailyAttendanceRow>(
        r#"
        SELECT a.employee_id, a.date, a.time_in, a.time_out, a.is_logged_in,
               e.name AS employee_name, e.email AS employee_email,
               e.in_time AS expected_in_time, d.role
        FROM attendance a
        LEFT JOIN employees e ON e.id = a.employee_id
        LEFT JOIN designations d ON d.id = e.designation_id
        WHERE a.date = ?
        ORDER BY a.time_in
        "#,
    )
    .bind(day)
    .fetch_all(pool)
    .await?;

    let employees = sqlx::query_as::<_, EmployeeWithRole>(&format!("{EMPLOYEE_WITH_ROLE} ORDER BY e.id"))
        .fetch_all(pool)
        .await?;

    debug!(records = records.len(), employees = employees.len(), "Building daily report");

    Ok(report::build_daily_report(day, &records, &employees, policy))
}

#[instrument(skip(pool))]
pub async fn employee_attendance(
    pool: &MySqlPool,
    employee_id: u64,
    now: NaiveDateTime,
) -> AppResult<EmployeeHistory> {
    let employee = fetch_employee(pool, employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, time_in, time_out, is_logged_in, session_duration
        FROM attendance
        WHERE employee_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    if records.is_empty() {
        return Err(AppError::NotFound("Attendance records"));
    }

    let breaks = sqlx::query_as::<_, BreakEntry>(
        r#"
        SELECT b.id, b.attendance_id, b.break_start, b.break_end, b.break_type, b.notes
        FROM breaks b
        JOIN attendance a ON a.id = b.attendance_id
        WHERE a.employee_id = ?
        ORDER BY b.break_start
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(report::build_history(&employee, &records, &breaks, now))
}

#[instrument(skip(pool))]
pub async fn present_employees(pool: &MySqlPool, employee_id: u64) -> AppResult<Vec<PresentEntry>> {
    let employee = sqlx::query_as::<_, EmployeeWithRole>(&format!("{EMPLOYEE_WITH_ROLE} WHERE e.id = ?"))
        .bind(employee_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, time_in, time_out, is_logged_in, session_duration
        FROM attendance
        WHERE employee_id = ? AND time_in IS NOT NULL AND time_out IS NOT NULL
        ORDER BY date DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    let present = report::present_entries(&employee.name, employee.role.as_deref(), &records);
    if present.is_empty() {
        return Err(AppError::NotFound("Present attendance records"));
    }

    Ok(present)
}
