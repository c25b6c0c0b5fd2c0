//! Router harness for handler tests
//!
//! The pool connects lazily to a closed port, so only paths that reject
//! before touching the database are exercised here.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use crate::config::DatabaseSettings;
use crate::http::server::{build_router, AppState, ServerConfig};

pub(crate) fn lazy_app(allow_destructive: bool) -> Router {
    let settings = DatabaseSettings {
        port: 1,
        ..Default::default()
    };
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy_with(settings.connect_options().unwrap());
    let config = ServerConfig {
        allow_destructive,
        ..Default::default()
    };
    build_router(AppState::new(pool, &settings, &config), &config)
}

pub(crate) async fn send(
    app: Router,
    method: &str,
    uri: &str,
    json: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match json {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_owned())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
