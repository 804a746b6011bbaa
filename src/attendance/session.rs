use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Minute-of-clock difference between time-in and time-out.
///
/// Both instants are truncated to the minute first, so 09:00:50 -> 09:30:10
/// counts 30. Full timestamps let a session that crosses midnight inside
/// one attendance day (22:00 -> 02:00) yield 240.
/// A time-out earlier than the time-in clamps to zero.
pub fn session_minutes(time_in: NaiveDateTime, time_out: NaiveDateTime) -> i32 {
    let minutes = (minute_floor(time_out) - minute_floor(time_in)).num_minutes();
    minutes.clamp(0, i32::MAX as i64) as i32
}

fn minute_floor(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// `HH:MM:SS`, the clock form echoed back to clients.
pub fn clock(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

/// `HH:MM`, seconds dropped.
pub fn clock_minutes(at: NaiveTime) -> String {
    at.format("%H:%M").to_string()
}

/// Clock time truncated to the minute.
pub fn truncate_to_minute(at: NaiveTime) -> NaiveTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn same_day_session() {
        assert_eq!(session_minutes(at(2, 9, 5, 0), at(2, 17, 35, 0)), 510);
    }

    #[test]
    fn seconds_do_not_shift_the_minute_difference() {
        assert_eq!(session_minutes(at(2, 9, 0, 50), at(2, 9, 30, 10)), 30);
        assert_eq!(session_minutes(at(2, 9, 0, 0), at(2, 9, 30, 59)), 30);
        assert_eq!(session_minutes(at(2, 9, 0, 59), at(2, 9, 1, 0)), 1);
    }

    #[test]
    fn cross_midnight_session_counts_full_span() {
        assert_eq!(session_minutes(at(2, 22, 0, 0), at(3, 2, 0, 0)), 240);
    }

    #[test]
    fn reversed_interval_clamps_to_zero() {
        assert_eq!(session_minutes(at(2, 12, 0, 0), at(2, 11, 0, 0)), 0);
    }

    #[test]
    fn clock_formats() {
        assert_eq!(clock(at(2, 7, 3, 9)), "07:03:09");
        assert_eq!(clock_minutes(at(2, 7, 3, 9).time()), "07:03");
        assert_eq!(
            truncate_to_minute(at(2, 7, 3, 59).time()),
            NaiveTime::from_hms_opt(7, 3, 0).unwrap()
        );
    }
}
