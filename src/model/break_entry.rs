use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BreakType {
    Lunch,
    Prayer,
    Personal,
    Other,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BreakEntry {
    pub id: u64,
    pub attendance_id: u64,
    pub break_start: NaiveDateTime,
    /// Open while the break is ongoing
    pub break_end: Option<NaiveDateTime>,
    pub break_type: String,
    pub notes: Option<String>,
}
