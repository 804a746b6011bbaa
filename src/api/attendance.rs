use crate::attendance::report::{DailyReport, EmployeeHistory};
use crate::attendance::reporter;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::AppResult;
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;

/// Today's attendance, classified
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Classified attendance for the current attendance day", body = DailyReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn today(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let day = config.policy.today();
    info!(user = %auth.username, %day, "Daily attendance requested");

    let report = reporter::daily_report(pool.get_ref(), day, &config.policy).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Full attendance history of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance history with break totals", body = EmployeeHistory),
        (status = 404, description = "Employee or records not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn employee_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();
    info!(user = %auth.username, employee_id, "Attendance history requested");

    let history =
        reporter::employee_attendance(pool.get_ref(), employee_id, config.policy.now_local()).await?;

    Ok(HttpResponse::Ok().json(history))
}

/// Days on which the employee both logged in and out
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}/present",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Present days", body = Object, example = json!({
            "presentEmployees": [{"name": "Ayesha Khan", "designation": "Developer", "date": "2025-06-02"}]
        })),
        (status = 404, description = "Employee or present records not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn present(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();
    info!(user = %auth.username, role = ?auth.role, employee_id, "Present days requested");

    let present_employees = reporter::present_employees(pool.get_ref(), employee_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "presentEmployees": present_employees
    })))
}
