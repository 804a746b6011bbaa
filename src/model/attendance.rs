use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: u64,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub time_in: Option<NaiveDateTime>,
    pub time_out: Option<NaiveDateTime>,
    pub is_logged_in: bool,
    /// Minutes between time-in and time-out once the session is closed
    pub session_duration: Option<i32>,
}

impl Attendance {
    pub fn is_present(&self) -> bool {
        self.time_in.is_some() && self.time_out.is_some()
    }
}

/// A day's record joined with the employee it belongs to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyAttendanceRow {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub time_in: Option<NaiveDateTime>,
    pub time_out: Option<NaiveDateTime>,
    pub is_logged_in: bool,
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
    pub expected_in_time: Option<NaiveTime>,
    pub role: Option<String>,
}
