//! `/health`, `/health/live` and `/health/ready`
//!
//! Only readiness touches the database; the other two answer as long as the
//! process is serving requests.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseStatus>,
}

#[derive(Serialize)]
pub struct DatabaseStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::bare("healthy"))
}

pub async fn liveness_check() -> Json<HealthStatus> {
    Json(HealthStatus::bare("alive"))
}

/// 200 with `ready` when the pool can run a query, 503 with `not_ready` otherwise
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => DatabaseStatus {
            reachable: true,
            error: None,
        },
        Err(e) => DatabaseStatus {
            reachable: false,
            error: Some(e.to_string()),
        },
    };

    let (code, status) = if database.reachable {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(HealthStatus {
            status,
            version: VERSION,
            database: Some(database),
        }),
    )
}
