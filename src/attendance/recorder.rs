//! Session recording: time-in, time-out and breaks.
//!
//! Every write is a single guarded statement (or one transaction when a
//! session close also closes an open break), so two near-simultaneous
//! requests for the same employee cannot both win.

use chrono::NaiveDateTime;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

use super::session::session_minutes;
use crate::config::AttendancePolicy;
use crate::error::{AppError, AppResult};
use crate::model::attendance::Attendance;
use crate::model::authentication::KeyHolder;
use crate::model::break_entry::BreakType;

#[derive(Debug)]
pub enum SessionEvent {
    TimeIn(Attendance),
    TimeOut(Attendance),
}

/// What a login call does given the day's existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    TimeIn,
    TimeOut,
    AlreadyMarked,
}

pub fn login_step(existing: Option<&Attendance>) -> LoginStep {
    match existing {
        None => LoginStep::TimeIn,
        Some(record) if record.time_out.is_none() && record.is_logged_in => LoginStep::TimeOut,
        Some(_) => LoginStep::AlreadyMarked,
    }
}

/// A logout or break target must be the caller's own, still-open session.
pub fn active_session(record: Option<Attendance>, employee_id: u64) -> AppResult<Attendance> {
    match record {
        Some(r) if r.employee_id == employee_id && r.is_logged_in && r.time_out.is_none() => Ok(r),
        _ => Err(AppError::InvalidSession),
    }
}

fn is_duplicate(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

async fn fetch_for_day(
    pool: &MySqlPool,
    employee_id: u64,
    day: chrono::NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, time_in, time_out, is_logged_in, session_duration
        FROM attendance
        WHERE employee_id = ? AND date = ?
        "#,
    )
    .bind(employee_id)
    .bind(day)
    .fetch_optional(pool)
    .await
}

async fn fetch_active(
    pool: &MySqlPool,
    employee_id: u64,
    attendance_id: u64,
) -> AppResult<Attendance> {
    let record = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, time_in, time_out, is_logged_in, session_duration
        FROM attendance
        WHERE id = ?
        "#,
    )
    .bind(attendance_id)
    .fetch_optional(pool)
    .await?;

    active_session(record, employee_id)
}

/// Writes the time-out of an open session. Returns `None` when another
/// request closed it first.
async fn close_session(
    pool: &MySqlPool,
    mut record: Attendance,
    now: NaiveDateTime,
) -> AppResult<Option<Attendance>> {
    let duration = record.time_in.map(|time_in| session_minutes(time_in, now));

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET time_out = ?, session_duration = ?, is_logged_in = FALSE
        WHERE id = ? AND time_out IS NULL AND is_logged_in = TRUE
        "#,
    )
    .bind(now)
    .bind(duration)
    .bind(record.id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let closed_breaks = sqlx::query(
        r#"
        UPDATE breaks
        SET break_end = GREATEST(?, break_start)
        WHERE attendance_id = ? AND break_end IS NULL
        "#,
    )
    .bind(now)
    .bind(record.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    if closed_breaks.rows_affected() > 0 {
        debug!(attendance_id = record.id, "Open break closed with the session");
    }

    record.time_out = Some(now);
    record.session_duration = duration;
    record.is_logged_in = false;
    Ok(Some(record))
}

/// First call of the attendance day records time-in, the second records
/// time-out, any further call is rejected.
#[instrument(skip(pool, holder, policy), fields(employee_id = holder.employee_id))]
pub async fn record_login(
    pool: &MySqlPool,
    holder: &KeyHolder,
    policy: &AttendancePolicy,
    now: NaiveDateTime,
) -> AppResult<SessionEvent> {
    let day = policy.attendance_day(now);
    debug!(%day, %now, "Resolved attendance day");

    let inserted = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, time_in, is_logged_in)
        VALUES (?, ?, ?, TRUE)
        "#,
    )
    .bind(holder.employee_id)
    .bind(day)
    .bind(now)
    .execute(pool)
    .await;

    match inserted {
        Ok(res) => {
            let record = Attendance {
                id: res.last_insert_id(),
                employee_id: holder.employee_id,
                date: day,
                time_in: Some(now),
                time_out: None,
                is_logged_in: true,
                session_duration: None,
            };
            info!(attendance_id = record.id, %day, "Time-in recorded");
            return Ok(SessionEvent::TimeIn(record));
        }
        Err(e) if is_duplicate(&e) => {
            debug!(%day, "Attendance record already exists for the day");
        }
        Err(e) => return Err(e.into()),
    }

    let existing = fetch_for_day(pool, holder.employee_id, day).await?;

    let existing = match (login_step(existing.as_ref()), existing) {
        (LoginStep::TimeOut, Some(record)) => record,
        (LoginStep::AlreadyMarked, record) => {
            info!(attendance_id = ?record.map(|r| r.id), %day, "Attendance already marked");
            return Err(AppError::AlreadyMarked);
        }
        _ => {
            return Err(
                anyhow::anyhow!("attendance row for {day} missing after duplicate insert").into(),
            );
        }
    };

    match close_session(pool, existing, now).await? {
        Some(record) => {
            info!(
                attendance_id = record.id,
                session_duration = ?record.session_duration,
                "Time-out recorded"
            );
            Ok(SessionEvent::TimeOut(record))
        }
        None => Err(AppError::AlreadyMarked),
    }
}

#[instrument(skip(pool, holder), fields(employee_id = holder.employee_id))]
pub async fn record_logout(
    pool: &MySqlPool,
    holder: &KeyHolder,
    attendance_id: u64,
    now: NaiveDateTime,
) -> AppResult<Attendance> {
    let active = fetch_active(pool, holder.employee_id, attendance_id).await?;

    let record = close_session(pool, active, now)
        .await?
        .ok_or(AppError::InvalidSession)?;

    info!(
        attendance_id,
        session_duration = ?record.session_duration,
        "Logout recorded"
    );
    Ok(record)
}

#[instrument(skip(pool, holder, notes), fields(employee_id = holder.employee_id))]
pub async fn start_break(
    pool: &MySqlPool,
    holder: &KeyHolder,
    attendance_id: u64,
    break_type: BreakType,
    notes: Option<&str>,
    now: NaiveDateTime,
) -> AppResult<u64> {
    fetch_active(pool, holder.employee_id, attendance_id).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO breaks (attendance_id, break_start, break_type, notes)
        SELECT ?, ?, ?, ? FROM DUAL
        WHERE NOT EXISTS (
            SELECT 1 FROM breaks WHERE attendance_id = ? AND break_end IS NULL
        )
        "#,
    )
    .bind(attendance_id)
    .bind(now)
    .bind(break_type.as_ref())
    .bind(notes)
    .bind(attendance_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest("A break is already in progress".to_string()));
    }

    let break_id = result.last_insert_id();
    info!(attendance_id, break_id, %break_type, "Break started");
    Ok(break_id)
}

#[instrument(skip(pool, holder), fields(employee_id = holder.employee_id))]
pub async fn end_break(
    pool: &MySqlPool,
    holder: &KeyHolder,
    attendance_id: u64,
    now: NaiveDateTime,
) -> AppResult<()> {
    fetch_active(pool, holder.employee_id, attendance_id).await?;

    let result = sqlx::query(
        r#"
        UPDATE breaks
        SET break_end = GREATEST(?, break_start)
        WHERE attendance_id = ? AND break_end IS NULL
        "#,
    )
    .bind(now)
    .bind(attendance_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest("No break in progress".to_string()));
    }

    info!(attendance_id, "Break ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn opened(employee_id: u64) -> Attendance {
        Attendance {
            id: 10,
            employee_id,
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            time_in: Some(at(9, 0)),
            time_out: None,
            is_logged_in: true,
            session_duration: None,
        }
    }

    fn closed(employee_id: u64) -> Attendance {
        Attendance {
            time_out: Some(at(17, 30)),
            is_logged_in: false,
            session_duration: Some(510),
            ..opened(employee_id)
        }
    }

    #[test]
    fn login_toggles_time_in_then_time_out_then_rejects() {
        assert_eq!(login_step(None), LoginStep::TimeIn);
        assert_eq!(login_step(Some(&opened(1))), LoginStep::TimeOut);
        assert_eq!(login_step(Some(&closed(1))), LoginStep::AlreadyMarked);
    }

    #[test]
    fn already_marked_leaves_the_record_untouched() {
        let record = closed(1);
        let before = record.clone();

        assert_eq!(login_step(Some(&record)), LoginStep::AlreadyMarked);
        assert_eq!(record, before);
        assert_eq!(record.time_out, Some(at(17, 30)));
        assert_eq!(record.session_duration, Some(510));
    }

    #[test]
    fn inconsistent_open_record_is_not_closed_again() {
        let record = Attendance {
            is_logged_in: false,
            ..opened(1)
        };
        assert_eq!(login_step(Some(&record)), LoginStep::AlreadyMarked);
    }

    #[test]
    fn logout_accepts_own_open_session() {
        let record = active_session(Some(opened(1)), 1).unwrap();
        assert_eq!(record.id, 10);
    }

    #[test]
    fn logout_rejects_missing_foreign_or_closed_sessions() {
        assert!(matches!(active_session(None, 1), Err(AppError::InvalidSession)));
        assert!(matches!(active_session(Some(opened(2)), 1), Err(AppError::InvalidSession)));
        assert!(matches!(active_session(Some(closed(1)), 1), Err(AppError::InvalidSession)));
    }
}
