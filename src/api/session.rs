use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::instrument;
use utoipa::ToSchema;

use crate::attendance::recorder::{self, SessionEvent};
use crate::attendance::session::clock;
use crate::auth::secret_key;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::model::attendance::Attendance;
use crate::model::authentication::KeyHolder;
use crate::models::LoginReq;

pub const SECRET_KEY_HEADER: &str = "secret-key";
pub const ATTENDANCE_ID_HEADER: &str = "attendance-id";

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(example = "Login successful (Time-In recorded)")]
    pub message: String,
    pub employee_id: u64,
    pub employee_name: String,
    #[schema(nullable = true)]
    pub role_company: Option<String>,
    pub attendance_id: u64,
    #[schema(example = "09:04:12", nullable = true)]
    pub in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "17:31:40")]
    pub out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 507)]
    pub session_duration: Option<i32>,
    pub is_logged_in: bool,
    #[schema(example = "2025-06-02", format = "date", value_type = String)]
    pub attendance_date: NaiveDate,
}

impl SessionResponse {
    fn new(message: &str, holder: KeyHolder, record: Attendance) -> Self {
        Self {
            message: message.to_string(),
            employee_id: holder.employee_id,
            employee_name: holder.name,
            role_company: holder.role_company,
            attendance_id: record.id,
            in_time: record.time_in.map(clock),
            out_time: record.time_out.map(clock),
            session_duration: record.session_duration,
            is_logged_in: record.is_logged_in,
            attendance_date: record.date,
        }
    }
}

/// Reads the secret key and attendance id headers used by logout and breaks.
pub(crate) fn session_headers(req: &HttpRequest) -> AppResult<(String, u64)> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let (Some(secret_key), Some(attendance_id)) =
        (header(SECRET_KEY_HEADER), header(ATTENDANCE_ID_HEADER))
    else {
        return Err(AppError::BadRequest(
            "Secret Key and Attendance ID are required.".to_string(),
        ));
    };

    let attendance_id = attendance_id
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest("Attendance ID must be a positive integer.".to_string()))?;

    Ok((secret_key.to_string(), attendance_id))
}

/// Time-in on the first call of the attendance day, time-out on the second
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Time-in or time-out recorded", body = SessionResponse),
        (status = 400, description = "Attendance already marked for today", body = Object, example = json!({
            "error": "Attendance already marked for today"
        })),
        (status = 401, description = "Invalid secret key", body = Object, example = json!({
            "error": "Invalid Secret Key"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_login", skip_all)]
pub async fn login(
    body: web::Json<LoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let holder = secret_key::resolve(pool.get_ref(), &body.secret_key).await?;
    let now = config.policy.now_local();

    let response = match recorder::record_login(pool.get_ref(), &holder, &config.policy, now).await? {
        SessionEvent::TimeIn(record) => {
            SessionResponse::new("Login successful (Time-In recorded)", holder, record)
        }
        SessionEvent::TimeOut(record) => {
            SessionResponse::new("Logout successful (Time-Out recorded)", holder, record)
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Explicit time-out for an active session
#[utoipa::path(
    post,
    path = "/logout",
    params(
        ("secret-key" = String, Header, description = "Employee secret key"),
        ("attendance-id" = u64, Header, description = "Active attendance record id")
    ),
    responses(
        (status = 200, description = "Time-out recorded", body = SessionResponse),
        (status = 400, description = "Missing headers or no active session", body = Object, example = json!({
            "error": "Invalid Attendance ID or no active login session found"
        })),
        (status = 401, description = "Invalid secret key"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_logout", skip_all)]
pub async fn logout(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let (key, attendance_id) = session_headers(&req)?;
    let holder = secret_key::resolve(pool.get_ref(), &key).await?;
    let now = config.policy.now_local();

    let record = recorder::record_logout(pool.get_ref(), &holder, attendance_id, now).await?;

    Ok(HttpResponse::Ok().json(SessionResponse::new(
        "Logout successful (Time-Out recorded).",
        holder,
        record,
    )))
}
