//! Response middleware.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::server::routes::ApiErrorBody;

/// Message returned when the outer request deadline expires.
pub const REQUEST_TIMEOUT_ERROR: &str = "Request timed out";

/// Give the bare 408 produced by `TimeoutLayer` the standard error envelope.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request exceeded the configured timeout");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ApiErrorBody {
            success: false,
            error: REQUEST_TIMEOUT_ERROR.to_string(),
            message: None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::{middleware, Router};
    use std::time::Duration;
    use tower::ServiceExt;
    use tower_http::timeout::TimeoutLayer;

    fn router() -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "ok" }))
            .layer(TimeoutLayer::new(Duration::from_millis(20)))
            .layer(middleware::map_response(timeout_envelope))
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_timeout_gets_error_envelope() {
        let (status, body) = call("/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, r#"{"success":false,"error":"Request timed out"}"#);
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let (status, body) = call("/fast").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
