use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::OnceCell;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::authentication::{KeyHolder, KeyHolderRow};

const MAX_CAPACITY: u64 = 50_000;
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// secret key => employee identity. Only successful resolutions are stored.
static SECRET_KEY_CACHE: OnceCell<Cache<String, KeyHolder>> = OnceCell::new();

fn build(ttl: Duration) -> Cache<String, KeyHolder> {
    Cache::builder()
        .max_capacity(MAX_CAPACITY)
        .time_to_live(ttl)
        .build()
}

fn cache() -> &'static Cache<String, KeyHolder> {
    SECRET_KEY_CACHE.get_or_init(|| build(DEFAULT_TTL))
}

/// Sets the entry lifetime. Has no effect once the cache is in use.
pub fn init(ttl: Duration) {
    if SECRET_KEY_CACHE.set(build(ttl)).is_err() {
        log::warn!("Secret key cache already initialised; keeping existing TTL");
    }
}

pub async fn remember(secret_key: &str, holder: KeyHolder) {
    cache().insert(secret_key.to_string(), holder).await;
}

pub async fn lookup(secret_key: &str) -> Option<KeyHolder> {
    cache().get(secret_key).await
}

/// Batch insert resolved keys
async fn batch_remember(rows: Vec<(String, KeyHolder)>) {
    let futures: Vec<_> = rows
        .into_iter()
        .map(|(key, holder)| cache().insert(key, holder))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Preloads every provisioned secret key (batched)
pub async fn warmup_secret_key_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, KeyHolderRow>(
        r#"
        SELECT a.secret_key, e.id AS employee_id, e.name, e.role_company
        FROM authentications a
        JOIN employees e ON e.id = a.employee_id
        "#,
    )
    .fetch(pool);

    let mut batch: Vec<(String, KeyHolder)> = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?.into());
        total_count += 1;

        if batch.len() >= batch_size {
            batch_remember(std::mem::replace(&mut batch, Vec::with_capacity(batch_size))).await;
        }
    }

    if !batch.is_empty() {
        batch_remember(batch).await;
    }

    log::info!("Secret key cache warmup complete: {} keys", total_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(id: u64) -> KeyHolder {
        KeyHolder {
            employee_id: id,
            name: format!("Employee {id}"),
            role_company: None,
        }
    }

    #[actix_web::test]
    async fn remembered_keys_are_returned() {
        remember("cache-test-key-a", holder(41)).await;
        let hit = lookup("cache-test-key-a").await.unwrap();
        assert_eq!(hit.employee_id, 41);
    }

    #[actix_web::test]
    async fn unknown_keys_miss() {
        assert!(lookup("cache-test-key-never-stored").await.is_none());
    }

    #[actix_web::test]
    async fn batch_insert_stores_every_row() {
        batch_remember(vec![
            ("cache-test-batch-1".to_string(), holder(1)),
            ("cache-test-batch-2".to_string(), holder(2)),
        ])
        .await;
        assert_eq!(lookup("cache-test-batch-2").await.unwrap().employee_id, 2);
    }
}
