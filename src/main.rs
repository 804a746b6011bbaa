use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use std::io::Read;
use std::time::Duration;

mod api;
mod attendance;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod utils;

use config::Config;
use db::{init_db, run_migrations};

use crate::docs::ApiDoc;
use crate::utils::secret_key_cache;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// `hash-password`: reads a password from stdin and prints its argon2 hash.
fn hash_password_from_stdin() -> anyhow::Result<()> {
    let mut password = String::new();
    std::io::stdin()
        .read_to_string(&mut password)
        .context("failed to read password from stdin")?;

    let hashed = auth::password::hash_password(password.trim_end_matches(['\r', '\n']))
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    println!("{hashed}");
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return hash_password_from_stdin();
    }

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendance.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        zone = %config.policy.zone_name,
        offset = %config.policy.utc_offset,
        rollover_hour = config.policy.rollover_hour,
        "Server starting..."
    );

    let pool = init_db(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        run_migrations(&pool).await.context("failed to apply migrations")?;
    }

    secret_key_cache::init(Duration::from_secs(config.secret_key_cache_ttl));

    let pool_for_cache_warmup = pool.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = secret_key_cache::warmup_secret_key_cache(&pool_for_cache_warmup, 250).await {
            error!(error = ?e, "Failed to warmup secret key cache");
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so JS/CSS assets resolve
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
