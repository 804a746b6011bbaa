//! Pure report assembly over rows already fetched from storage.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use super::breaks::{BreakDetail, aggregate, format_duration};
use super::session::{clock, clock_minutes};
use super::status::{AttendanceStatus, classify};
use super::{NOT_LOGGED_IN, NOT_LOGGED_OUT, UNKNOWN};
use crate::config::AttendancePolicy;
use crate::model::attendance::{Attendance, DailyAttendanceRow};
use crate::model::break_entry::BreakEntry;
use crate::model::employee::{Employee, EmployeeWithRole};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "Ayesha Khan")]
    pub employee_name: String,
    #[schema(example = "ayesha.khan@company.com")]
    pub employee_email: String,
    #[schema(example = "Developer")]
    pub designation: String,
    #[schema(example = "09:10")]
    pub login_time: String,
    #[schema(example = "Not Logged Out Yet")]
    pub logout_time: String,
    pub is_logged_in: bool,
    #[schema(example = "2025-06-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = 12)]
    pub total_employees: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub logged_in_employees: Vec<DailyEntry>,
    pub leave_employees: Vec<DailyEntry>,
}

/// Classifies the day's records and appends every employee without a
/// record to the leave list.
pub fn build_daily_report(
    day: NaiveDate,
    records: &[DailyAttendanceRow],
    employees: &[EmployeeWithRole],
    policy: &AttendancePolicy,
) -> DailyReport {
    let total_employees = employees.len();
    let mut logged_in_employees = Vec::new();
    let mut leave_employees = Vec::new();

    for record in records {
        let time_in = record.time_in.map(|t| t.time());
        let status = classify(time_in, record.is_logged_in, record.expected_in_time, policy);

        let entry = DailyEntry {
            employee_id: record.employee_id,
            employee_name: record.employee_name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            employee_email: record.employee_email.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            designation: record.role.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            login_time: time_in
                .map(clock_minutes)
                .unwrap_or_else(|| NOT_LOGGED_IN.to_string()),
            logout_time: record
                .time_out
                .map(clock)
                .unwrap_or_else(|| NOT_LOGGED_OUT.to_string()),
            is_logged_in: record.is_logged_in,
            date: record.date,
            status,
            total_employees,
        };

        if status == AttendanceStatus::Leave {
            leave_employees.push(entry);
        } else {
            logged_in_employees.push(entry);
        }
    }

    let recorded: HashSet<u64> = records.iter().map(|r| r.employee_id).collect();
    leave_employees.extend(
        employees
            .iter()
            .filter(|e| !recorded.contains(&e.id))
            .map(|e| DailyEntry {
                employee_id: e.id,
                employee_name: e.name.clone(),
                employee_email: e.email.clone(),
                designation: e.role.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                login_time: NOT_LOGGED_IN.to_string(),
                logout_time: NOT_LOGGED_OUT.to_string(),
                is_logged_in: false,
                date: day,
                status: AttendanceStatus::Leave,
                total_employees,
            }),
    );

    DailyReport {
        logged_in_employees,
        leave_employees,
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEmployee {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub login_time: String,
    pub logout_time: String,
    pub is_logged_in: bool,
    #[schema(example = "2025-06-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub session_duration: Option<i32>,
    pub breaks: Vec<BreakDetail>,
    pub daily_break_duration: String,
    pub employee: HistoryEmployee,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeHistory {
    pub attendance_records: Vec<HistoryRecord>,
    pub total_presents: usize,
    pub total_leaves: usize,
    pub total_break_minutes: String,
}

pub fn build_history(
    employee: &Employee,
    records: &[Attendance],
    breaks: &[BreakEntry],
    now: NaiveDateTime,
) -> EmployeeHistory {
    let mut by_record: HashMap<u64, Vec<&BreakEntry>> = HashMap::new();
    for b in breaks {
        by_record.entry(b.attendance_id).or_default().push(b);
    }

    let mut total_presents = 0;
    let mut total_leaves = 0;
    let mut total_break_minutes = 0;

    let attendance_records = records
        .iter()
        .map(|record| {
            if record.is_present() {
                total_presents += 1;
            } else {
                total_leaves += 1;
            }

            let daily = aggregate(
                by_record.get(&record.id).into_iter().flatten().copied(),
                now,
            );
            total_break_minutes += daily.minutes;

            let logout_time = match record.time_out {
                Some(out) if !record.is_logged_in => clock(out),
                _ => NOT_LOGGED_OUT.to_string(),
            };

            HistoryRecord {
                login_time: record
                    .time_in
                    .map(clock)
                    .unwrap_or_else(|| NOT_LOGGED_IN.to_string()),
                logout_time,
                is_logged_in: record.is_logged_in,
                date: record.date,
                session_duration: record.session_duration,
                breaks: daily.details,
                daily_break_duration: format_duration(daily.minutes),
                employee: HistoryEmployee {
                    id: employee.id,
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                },
            }
        })
        .collect();

    EmployeeHistory {
        attendance_records,
        total_presents,
        total_leaves,
        total_break_minutes: format_duration(total_break_minutes),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PresentEntry {
    pub name: String,
    pub designation: String,
    #[schema(example = "2025-06-02", format = "date", value_type = String)]
    pub date: NaiveDate,
}

/// Records with both time-in and time-out, projected to name and designation.
pub fn present_entries(name: &str, designation: Option<&str>, records: &[Attendance]) -> Vec<PresentEntry> {
    records
        .iter()
        .filter(|r| r.is_present())
        .map(|r| PresentEntry {
            name: name.to_string(),
            designation: designation.unwrap_or(UNKNOWN).to_string(),
            date: r.date,
        })
        .collect()
}
