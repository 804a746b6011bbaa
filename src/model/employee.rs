use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Ayesha Khan",
        "email": "ayesha.khan@company.com",
        "in_time": "09:00:00",
        "designation_id": 2,
        "role_company": "Senior Engineer"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Ayesha Khan")]
    pub name: String,

    #[schema(example = "ayesha.khan@company.com")]
    pub email: String,

    /// Expected time-in; the configured default applies when unset
    #[schema(example = "09:00:00", value_type = Option<String>, nullable = true)]
    pub in_time: Option<NaiveTime>,

    #[schema(example = 2, nullable = true)]
    pub designation_id: Option<u64>,

    #[schema(example = "Senior Engineer", nullable = true)]
    pub role_company: Option<String>,
}

/// Employee joined with the role label of its designation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeWithRole {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub in_time: Option<NaiveTime>,
    pub role: Option<String>,
}
