use chrono::NaiveTime;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

use super::session::truncate_to_minute;
use crate::config::AttendancePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr, ToSchema)]
pub enum AttendanceStatus {
    #[serde(rename = "On Time")]
    #[strum(serialize = "On Time")]
    OnTime,
    Late,
    Leave,
}

/// Classifies one attendance record against the employee's expected time-in.
///
/// Seconds are ignored on both sides. A record flagged as logged in but
/// without any time-in has no clock to compare against the expected
/// time-in, so it can never fall inside the tolerance and counts as Late.
pub fn classify(
    time_in: Option<NaiveTime>,
    is_logged_in: bool,
    expected_in: Option<NaiveTime>,
    policy: &AttendancePolicy,
) -> AttendanceStatus {
    match time_in {
        Some(actual) => {
            let expected = truncate_to_minute(expected_in.unwrap_or(policy.default_in_time));
            let diff = (truncate_to_minute(actual) - expected).num_minutes();
            if diff.abs() <= policy.tolerance_minutes {
                AttendanceStatus::OnTime
            } else {
                AttendanceStatus::Late
            }
        }
        None if is_logged_in => AttendanceStatus::Late,
        None => AttendanceStatus::Leave,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn within_tolerance_is_on_time() {
        let policy = AttendancePolicy::default();
        assert_eq!(classify(Some(hm(9, 10)), true, Some(hm(9, 0)), &policy), AttendanceStatus::OnTime);
        assert_eq!(classify(Some(hm(9, 15)), false, Some(hm(9, 0)), &policy), AttendanceStatus::OnTime);
        assert_eq!(classify(Some(hm(8, 45)), true, Some(hm(9, 0)), &policy), AttendanceStatus::OnTime);
    }

    #[test]
    fn beyond_tolerance_is_late_in_both_directions() {
        let policy = AttendancePolicy::default();
        assert_eq!(classify(Some(hm(9, 20)), true, Some(hm(9, 0)), &policy), AttendanceStatus::Late);
        assert_eq!(classify(Some(hm(9, 16)), true, Some(hm(9, 0)), &policy), AttendanceStatus::Late);
        assert_eq!(classify(Some(hm(8, 44)), true, Some(hm(9, 0)), &policy), AttendanceStatus::Late);
    }

    #[test]
    fn seconds_are_ignored() {
        let policy = AttendancePolicy::default();
        let just_in = NaiveTime::from_hms_opt(9, 15, 59).unwrap();
        assert_eq!(classify(Some(just_in), true, Some(hm(9, 0)), &policy), AttendanceStatus::OnTime);
    }

    #[test]
    fn missing_expected_time_uses_policy_default() {
        let policy = AttendancePolicy::default();
        assert_eq!(classify(Some(hm(9, 5)), true, None, &policy), AttendanceStatus::OnTime);
        assert_eq!(classify(Some(hm(10, 0)), true, None, &policy), AttendanceStatus::Late);
    }

    #[test]
    fn no_time_in() {
        let policy = AttendancePolicy::default();
        assert_eq!(classify(None, false, Some(hm(9, 0)), &policy), AttendanceStatus::Leave);
        assert_eq!(classify(None, true, Some(hm(9, 0)), &policy), AttendanceStatus::Late);
    }

    #[test]
    fn status_labels() {
        assert_eq!(AttendanceStatus::OnTime.to_string(), "On Time");
        assert_eq!(serde_json::to_string(&AttendanceStatus::Leave).unwrap(), "\"Leave\"");
    }
}
