use crate::{
    auth::{jwt::generate_access_token, password::verify_password},
    config::Config,
    error::{AppError, AppResult},
    model::role::Role,
    models::{AdminLoginReq, AdminSql},
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = 900)]
    pub expires_in: usize,
}

/// Admin token endpoint
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body = AdminLoginReq,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "admin_token",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn issue_token(
    user: web::Json<AdminLoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    info!("Token request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        return Err(AppError::BadRequest("Username or password required".to_string()));
    }

    let admin = sqlx::query_as::<_, AdminSql>(
        r#"
        SELECT id, username, password, role_id
        FROM admin_users
        WHERE username = ?
        "#,
    )
    .bind(user.username.trim())
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| {
        info!("Invalid credentials: user not found");
        AppError::InvalidCredentials
    })?;

    debug!(user_id = admin.id, "Verifying password");

    if let Err(e) = verify_password(&user.password, &admin.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    if Role::from_id(admin.role_id).is_none() {
        info!(role_id = admin.role_id, "Unknown role on admin account");
        return Err(AppError::Forbidden);
    }

    let access_token = generate_access_token(
        admin.id,
        admin.username,
        admin.role_id,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    info!("Token issued");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.access_token_ttl,
    }))
}
