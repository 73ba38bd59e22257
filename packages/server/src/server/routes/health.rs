use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    backend: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Pings the product store. Returns 200 OK when it answers within 5s,
/// 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let store = &state.deps.store;

    let store_health = match tokio::time::timeout(std::time::Duration::from_secs(5), store.ping()).await
    {
        Ok(Ok(())) => StoreHealth {
            backend: store.name().to_string(),
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check store ping failed");
            StoreHealth {
                backend: store.name().to_string(),
                status: "error".to_string(),
                error: Some("Store ping failed".to_string()),
            }
        }
        Err(_) => StoreHealth {
            backend: store.name().to_string(),
            status: "error".to_string(),
            error: Some("Store ping timeout (>5s)".to_string()),
        },
    };

    let is_healthy = store_health.status == "ok";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "ok" } else { "unhealthy" }.to_string(),
            store: store_health,
        }),
    )
}
