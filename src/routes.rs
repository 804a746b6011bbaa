use crate::{
    api::{attendance, breaks, designation, session},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("non-zero period and burst size");
        Governor::new(&cfg)
    }

    let clock_limiter = Arc::new(build_limiter(config.rate_clock_per_min));
    let token_limiter = Arc::new(build_limiter(config.rate_token_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Employee clock endpoints, authenticated by secret key
    cfg.service(
        web::resource("/login")
            .wrap(clock_limiter.clone())
            .route(web::post().to(session::login)),
    )
    .service(
        web::resource("/logout")
            .wrap(clock_limiter.clone())
            .route(web::post().to(session::logout)),
    )
    .service(
        web::scope("/breaks")
            .wrap(clock_limiter)
            .service(web::resource("/start").route(web::post().to(breaks::start_break)))
            .service(web::resource("/end").route(web::post().to(breaks::end_break))),
    );

    cfg.service(
        web::scope("/auth").service(
            web::resource("/token")
                .wrap(token_limiter)
                .route(web::post().to(handlers::issue_token)),
        ),
    );

    // Admin reports
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/attendance")
                    // registered before /{employee_id}
                    .service(web::resource("/today").route(web::get().to(attendance::today)))
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    .service(
                        web::resource("/{employee_id}/present")
                            .route(web::get().to(attendance::present)),
                    ),
            )
            .service(
                web::resource("/designations")
                    .route(web::get().to(designation::list_designations)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;
    use actix_web::{App, http::StatusCode, test, web::Data};
    use serde_json::Value;
    use sqlx::mysql::MySqlPoolOptions;
    use std::net::SocketAddr;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    macro_rules! test_app {
        () => {{
            let config = Config::for_tests();
            // never connects; every request below is rejected before storage
            let pool = MySqlPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap();
            let route_config = config.clone();
            test::init_service(
                App::new()
                    .app_data(Data::new(pool))
                    .app_data(Data::new(config))
                    .configure(move |cfg| configure(cfg, route_config)),
            )
            .await
        }};
    }

    async fn error_of(resp: actix_web::dev::ServiceResponse) -> String {
        let body: Value = test::read_body_json(resp).await;
        body["error"].as_str().unwrap_or_default().to_string()
    }

    #[actix_web::test]
    async fn logout_without_headers_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::post().uri("/logout").peer_addr(peer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(resp).await, "Secret Key and Attendance ID are required.");
    }

    #[actix_web::test]
    async fn logout_with_only_secret_key_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header(("secret-key", "abc"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn logout_with_non_numeric_attendance_id_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header(("secret-key", "abc"))
            .insert_header(("attendance-id", "64b7f0c2e1"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(resp).await, "Attendance ID must be a positive integer.");
    }

    #[actix_web::test]
    async fn login_with_blank_secret_key_is_unauthorized() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "secretKey": "   " }))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(resp).await, "Invalid Secret Key");
    }

    #[actix_web::test]
    async fn login_without_secret_key_is_unauthorized() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({}))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(resp).await, "Invalid Secret Key");
    }

    #[actix_web::test]
    async fn login_without_body_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::post().uri("/login").peer_addr(peer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }

    #[actix_web::test]
    async fn break_end_without_headers_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::post().uri("/breaks/end").peer_addr(peer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn reports_require_bearer_token() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/attendance/today")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn reports_reject_tampered_token() {
        let app = test_app!();
        let token = generate_access_token(1, "admin".to_string(), 1, "other-secret", 600).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/attendance/today")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn reports_are_forbidden_for_viewer_role() {
        let app = test_app!();
        let config = Config::for_tests();
        let token =
            generate_access_token(3, "viewer".to_string(), 3, &config.jwt_secret, 600).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/attendance/42/present")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn token_request_with_blank_credentials_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(serde_json::json!({ "username": "", "password": "" }))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
