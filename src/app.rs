use std::net::SocketAddr;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{accounts, auth, employees};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(employees::router())
        .merge(accounts::router())
        .merge(auth::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub fn bind_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use time::{Duration, OffsetDateTime};
    use tower::ServiceExt;

    use super::*;

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn ana() -> Value {
        json!({
            "identifier": 1001,
            "name": "Ana",
            "email": "a@x.com",
            "supervisor": "Bob",
            "department": "Eng",
            "ingestion_date": "2020-01-01",
            "active": true
        })
    }

    #[tokio::test]
    async fn register_and_login_scenario() {
        let app = build_app(AppState::fake());

        let (status, body) = call(&app, Method::POST, "/employees", Some(ana())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ana());

        let (status, body) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({"identifier": 1001, "role": "admin", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["identifier"], 1001);
        assert_eq!(body["role"], "admin");
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let (status, body) = call(
            &app,
            Method::POST,
            "/login",
            Some(json!({"identifier": 1001, "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "login successful");

        let (status, _) = call(
            &app,
            Method::POST,
            "/login",
            Some(json!({"identifier": 1001, "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn lookups_round_trip_and_miss() {
        let app = build_app(AppState::fake());
        call(&app, Method::POST, "/employees", Some(ana())).await;

        let (status, body) = call(&app, Method::GET, "/employees/1001", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ana());

        let (status, body) = call(&app, Method::GET, "/employees/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "employee not found");

        let (_, created) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({"identifier": 1001, "role": "clerk", "password": "pw"})),
        )
        .await;
        let uri = format!("/accounts/{}", created["id"]);
        let (status, body) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);

        let (status, _) = call(&app, Method::GET, "/accounts/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn creation_failures_map_to_statuses() {
        let app = build_app(AppState::fake());
        call(&app, Method::POST, "/employees", Some(ana())).await;

        let (status, body) = call(&app, Method::POST, "/employees", Some(ana())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "employee already exists");

        let mut future = ana();
        future["identifier"] = json!(1002);
        future["ingestion_date"] =
            json!((OffsetDateTime::now_utc().date() + Duration::days(1)).to_string());
        let (status, _) = call(&app, Method::POST, "/employees", Some(future)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({"identifier": 4040, "role": "admin", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let account = json!({"identifier": 1001, "role": "admin", "password": "pw"});
        call(&app, Method::POST, "/accounts", Some(account.clone())).await;
        let (status, _) = call(&app, Method::POST, "/accounts", Some(account)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let app = build_app(AppState::fake());
        call(&app, Method::POST, "/employees", Some(ana())).await;
        call(
            &app,
            Method::POST,
            "/accounts",
            Some(json!({"identifier": 1001, "role": "admin", "password": "secret123"})),
        )
        .await;

        let wrong = call(
            &app,
            Method::POST,
            "/login",
            Some(json!({"identifier": 1001, "password": "nope"})),
        )
        .await;
        let unknown = call(
            &app,
            Method::POST,
            "/login",
            Some(json!({"identifier": 77, "password": "secret123"})),
        )
        .await;
        assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong, unknown);
    }

    #[tokio::test]
    async fn active_defaults_to_true() {
        let app = build_app(AppState::fake());
        let mut body = ana();
        body.as_object_mut().unwrap().remove("active");
        let (status, echoed) = call(&app, Method::POST, "/employees", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed["active"], true);
    }

    #[tokio::test]
    async fn health_responds() {
        let app = build_app(AppState::fake());
        let (status, _) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn bind_addr_uses_config() {
        let state = AppState::fake();
        let addr = bind_addr(&state.config).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:0");
    }
}
