use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::instrument;

use super::session::session_headers;
use crate::attendance::recorder;
use crate::auth::secret_key;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::StartBreakReq;

/// Start a break inside the active session
#[utoipa::path(
    post,
    path = "/breaks/start",
    params(
        ("secret-key" = String, Header, description = "Employee secret key"),
        ("attendance-id" = u64, Header, description = "Active attendance record id")
    ),
    request_body = StartBreakReq,
    responses(
        (status = 200, description = "Break started", body = Object, example = json!({
            "message": "Break started",
            "breakId": 12
        })),
        (status = 400, description = "No active session or a break is already in progress"),
        (status = 401, description = "Invalid secret key"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Breaks"
)]
#[instrument(name = "break_start", skip_all)]
pub async fn start_break(
    req: HttpRequest,
    body: web::Json<StartBreakReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let (key, attendance_id) = session_headers(&req)?;
    let holder = secret_key::resolve(pool.get_ref(), &key).await?;

    let break_id = recorder::start_break(
        pool.get_ref(),
        &holder,
        attendance_id,
        body.break_type,
        body.notes.as_deref(),
        config.policy.now_local(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Break started",
        "breakId": break_id
    })))
}

/// End the open break
#[utoipa::path(
    post,
    path = "/breaks/end",
    params(
        ("secret-key" = String, Header, description = "Employee secret key"),
        ("attendance-id" = u64, Header, description = "Active attendance record id")
    ),
    responses(
        (status = 200, description = "Break ended", body = Object, example = json!({
            "message": "Break ended"
        })),
        (status = 400, description = "No active session or no break in progress"),
        (status = 401, description = "Invalid secret key"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Breaks"
)]
#[instrument(name = "break_end", skip_all)]
pub async fn end_break(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let (key, attendance_id) = session_headers(&req)?;
    let holder = secret_key::resolve(pool.get_ref(), &key).await?;

    recorder::end_break(pool.get_ref(), &holder, attendance_id, config.policy.now_local()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Break ended"
    })))
}
