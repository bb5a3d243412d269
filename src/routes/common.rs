//! Operational routes outside the versioned API. Answered as JSON regardless of `Accept`.

use crate::response::json_response;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
}

/// Readiness of the process and of the champion store behind it.
#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn health() -> Response {
    json_response(StatusCode::OK, &Liveness { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Response {
    match state.champions.ping().await {
        Ok(()) => json_response(
            StatusCode::OK,
            &Readiness {
                status: "ok",
                database: "ok",
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "champion store not ready");
            json_response(
                StatusCode::SERVICE_UNAVAILABLE,
                &Readiness {
                    status: "degraded",
                    database: "unavailable",
                },
            )
        }
    }
}

async fn version() -> Response {
    json_response(
        StatusCode::OK,
        &BuildInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// GET /health, GET /ready (store round trip), GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
