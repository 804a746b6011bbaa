use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::model::break_entry::BreakType;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginReq {
    #[schema(example = "k3y-2f9a7c")]
    #[serde(default)] // missing key is rejected as Unauthorized, not as a malformed body
    pub secret_key: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartBreakReq {
    #[schema(example = "lunch")]
    pub break_type: BreakType,
    #[schema(example = "Canteen", nullable = true)]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginReq {
    #[schema(example = "hr.admin")]
    pub username: String,
    pub password: String,
}

#[derive(FromRow)]
pub struct AdminSql {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub role_id: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
}
