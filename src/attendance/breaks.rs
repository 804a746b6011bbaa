use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::session::clock;
use crate::model::break_entry::BreakEntry;

/// Renders a minute count as `H hour(s) and M minute(s)`.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let remaining = minutes % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours} hour{}", if hours > 1 { "s" } else { "" }));
    }
    if remaining > 0 {
        if hours > 0 {
            out.push_str(" and ");
        }
        out.push_str(&format!("{remaining} minute{}", if remaining > 1 { "s" } else { "" }));
    }

    if out.is_empty() {
        "0 minutes".to_string()
    } else {
        out
    }
}

/// Length of one break, rounded to the nearest minute. Open breaks run until `now`.
pub fn break_minutes(start: NaiveDateTime, end: Option<NaiveDateTime>, now: NaiveDateTime) -> i64 {
    let seconds = (end.unwrap_or(now) - start).num_seconds().max(0);
    (seconds + 30) / 60
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakDetail {
    pub break_start_time: String,
    pub break_end_time: String,
    pub break_duration: String,
    pub break_type: String,
    pub break_notes: Option<String>,
}

/// Per-record break aggregate.
#[derive(Debug)]
pub struct DailyBreaks {
    pub details: Vec<BreakDetail>,
    pub minutes: i64,
}

pub fn aggregate<'a>(breaks: impl IntoIterator<Item = &'a BreakEntry>, now: NaiveDateTime) -> DailyBreaks {
    let mut minutes = 0;
    let details = breaks
        .into_iter()
        .map(|b| {
            let end = b.break_end.unwrap_or(now);
            let duration = break_minutes(b.break_start, b.break_end, now);
            minutes += duration;
            BreakDetail {
                break_start_time: clock(b.break_start),
                break_end_time: clock(end),
                break_duration: format_duration(duration),
                break_type: b.break_type.clone(),
                break_notes: b.notes.clone(),
            }
        })
        .collect();

    DailyBreaks { details, minutes }
}
