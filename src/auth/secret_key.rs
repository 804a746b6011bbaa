use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::model::authentication::KeyHolder;
use crate::utils::secret_key_cache;

/// Resolves the employee a secret key belongs to.
pub async fn resolve(pool: &MySqlPool, secret_key: &str) -> AppResult<KeyHolder> {
    let secret_key = secret_key.trim();
    if secret_key.is_empty() {
        info!("Empty secret key provided");
        return Err(AppError::Unauthorized);
    }

    if let Some(holder) = secret_key_cache::lookup(secret_key).await {
        debug!(employee_id = holder.employee_id, "Secret key resolved from cache");
        return Ok(holder);
    }

    let holder = sqlx::query_as::<_, KeyHolder>(
        r#"
        SELECT e.id AS employee_id, e.name, e.role_company
        FROM authentications a
        JOIN employees e ON e.id = a.employee_id
        WHERE a.secret_key = ?
        "#,
    )
    .bind(secret_key)
    .fetch_optional(pool)
    .await?;

    match holder {
        Some(holder) => {
            secret_key_cache::remember(secret_key, holder.clone()).await;
            Ok(holder)
        }
        None => {
            info!("Invalid secret key provided");
            Err(AppError::Unauthorized)
        }
    }
}
