use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Fixed set of role labels a designation row may carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter, ToSchema,
)]
pub enum DesignationRole {
    Sales,
    Developer,
    #[strum(serialize = "IT")]
    #[serde(rename = "IT")]
    It,
    Designer,
    #[strum(serialize = "GDS Agency")]
    #[serde(rename = "GDS Agency")]
    GdsAgency,
    Lead,
    #[strum(serialize = "Data Mining")]
    #[serde(rename = "Data Mining")]
    DataMining,
    MindHive,
    #[strum(serialize = "GDS")]
    #[serde(rename = "GDS")]
    Gds,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Designation {
    pub id: u64,
    pub role: String,
}

impl Designation {
    /// Stored label parsed into the known role set.
    pub fn parsed_role(&self) -> Option<DesignationRole> {
        self.role.parse().ok()
    }
}
