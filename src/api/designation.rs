use std::collections::BTreeMap;

use crate::auth::auth::AuthUser;
use crate::error::AppResult;
use crate::model::designation::Designation;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;
use utoipa::ToSchema;

#[derive(FromRow)]
struct DesignationMember {
    id: u64,
    role: String,
    employee_id: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DesignationResponse {
    #[schema(example = 2)]
    pub id: u64,
    #[schema(example = "Developer")]
    pub role: String,
    /// Ids of the employees holding this designation
    pub employees: Vec<u64>,
}

fn group(rows: Vec<DesignationMember>) -> Vec<DesignationResponse> {
    let mut grouped: BTreeMap<u64, DesignationResponse> = BTreeMap::new();

    for row in rows {
        let entry = grouped.entry(row.id).or_insert_with(|| {
            let designation = Designation {
                id: row.id,
                role: row.role.clone(),
            };
            DesignationResponse {
                id: row.id,
                // canonical label when known, stored text otherwise
                role: designation
                    .parsed_role()
                    .map(|r| r.to_string())
                    .unwrap_or(designation.role),
                employees: Vec::new(),
            }
        });
        if let Some(employee_id) = row.employee_id {
            entry.employees.push(employee_id);
        }
    }

    grouped.into_values().collect()
}

/// List designations with their employees
#[utoipa::path(
    get,
    path = "/api/designations",
    responses(
        (status = 200, description = "Designations and the employees holding them", body = [DesignationResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Designations"
)]
pub async fn list_designations(auth: AuthUser, pool: web::Data<MySqlPool>) -> AppResult<HttpResponse> {
    debug!(user_id = auth.user_id, "Listing designations");

    let rows = sqlx::query_as::<_, DesignationMember>(
        r#"
        SELECT d.id, d.role, e.id AS employee_id
        FROM designations d
        LEFT JOIN employees e ON e.designation_id = d.id
        ORDER BY d.id, e.id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(group(rows)))
}
