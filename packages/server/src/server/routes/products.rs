//! `/api/products` handlers.
//!
//! Every response uses the `{ success, data, optimizationFailed?, warning? }`
//! envelope; failures use `{ success: false, error, message? }`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domains::products::actions;
use crate::domains::products::{Outcome, OptimizeError};
use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub asin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReoptimizeRequest {
    #[serde(default)]
    pub history_id: Option<i64>,
}

/// Success envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_failed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            optimization_failed: None,
            warning: None,
        })
    }

    pub fn from_outcome(outcome: Outcome<T>) -> Json<Self> {
        Json(Self {
            success: true,
            data: outcome.data,
            optimization_failed: Some(outcome.optimization_failed),
            warning: outcome.warning.map(str::to_string),
        })
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An [`OptimizeError`] tagged with the route's generic failure text.
#[derive(Debug)]
pub struct ApiError {
    failure: &'static str,
    source: OptimizeError,
}

impl ApiError {
    fn new(failure: &'static str) -> impl FnOnce(OptimizeError) -> Self {
        move |source| Self { failure, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self.source {
            OptimizeError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            OptimizeError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            OptimizeError::Fetch(e) => {
                error!(error = %e, "{}", self.failure);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.failure.to_string(),
                    Some(e.to_string()),
                )
            }
            OptimizeError::Persistence(e) => {
                error!(error = %e, "{}", self.failure);
                (StatusCode::INTERNAL_SERVER_ERROR, self.failure.to_string(), None)
            }
        };

        (
            status,
            Json(ApiErrorBody {
                success: false,
                error,
                message,
            }),
        )
            .into_response()
    }
}

/// POST /api/products/optimize
pub async fn optimize_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = ApiError::new("Failed to optimize product listing");
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let asin = request.asin.unwrap_or_default();

    let outcome = actions::optimize_product(&asin, &state.deps)
        .await
        .map_err(fail)?;
    Ok(ApiResponse::from_outcome(outcome))
}

/// POST /api/products/reoptimize
pub async fn reoptimize_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<ReoptimizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = ApiError::new("Failed to re-optimize");
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let outcome = actions::reoptimize_from_history(request.history_id, &state.deps)
        .await
        .map_err(fail)?;
    Ok(ApiResponse::from_outcome(outcome))
}

/// GET /api/products/asins
pub async fn list_asins_handler(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = actions::list_products(&state.deps)
        .await
        .map_err(ApiError::new("Failed to fetch ASINs"))?;
    Ok(ApiResponse::ok(products))
}

/// GET /api/products/:asin
pub async fn get_product_handler(
    Extension(state): Extension<AppState>,
    Path(asin): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = actions::get_product(&asin, &state.deps)
        .await
        .map_err(ApiError::new("Failed to fetch product"))?;
    Ok(ApiResponse::ok(product))
}

/// GET /api/products/:asin/history
pub async fn get_history_handler(
    Extension(state): Extension<AppState>,
    Path(asin): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let history = actions::get_history(&asin, &state.deps)
        .await
        .map_err(ApiError::new("Failed to fetch optimization history"))?;
    Ok(ApiResponse::ok(history))
}
