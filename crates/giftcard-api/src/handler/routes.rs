//! Route definitions
//!
//! - GET /            - Service banner with the current Eastern time
//! - GET /health      - Health check
//! - GET /cards       - Supported product names, in catalog order
//! - GET /cards/:name - Format rule for one product
//! - POST /generate   - Generate a batch of cards
//! - POST /validate   - Score a voucher and pin
//! - GET /metrics     - Prometheus metrics (when enabled)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use giftcard_core::{check_count, CardEngine, CardError, CardSchema, GeneratedCard, ValidationResult};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use super::middleware::{request_logging_middleware, RequestId};
use super::{
    ErrorInfo, ErrorResponse, GenerateRequest, HealthResponse, ServiceInfo, ValidateRequest,
};
use crate::metrics::CardMetrics;

/// State shared across all routes
pub struct AppState {
    pub engine: CardEngine<'static>,
    /// `None` when metrics are disabled
    pub metrics: Option<CardMetrics>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(metrics_enabled: bool) -> Result<Self, prometheus::Error> {
        let metrics = if metrics_enabled {
            Some(CardMetrics::new()?)
        } else {
            None
        };
        Ok(Self::with_engine(CardEngine::new(), metrics))
    }

    pub fn with_engine(engine: CardEngine<'static>, metrics: Option<CardMetrics>) -> Self {
        Self {
            engine,
            metrics,
            start_time: Instant::now(),
        }
    }

    /// Record and log a rejected request
    fn reject(&self, err: impl Into<ApiError>, request_id: &str) -> ApiError {
        let err: ApiError = err.into();
        let err = err.with_request_id(request_id);
        tracing::warn!(
            request_id = %request_id,
            code = err.kind.error_code(),
            message = %err.message,
            "Request rejected"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_error(err.kind.error_code());
        }
        err
    }
}

/// Categories of API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    InternalError,
}

impl ErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error returned by handlers
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl From<CardError> for ApiError {
    fn from(err: CardError) -> Self {
        let kind = match err {
            CardError::NotFound(_) => ErrorKind::NotFound,
            CardError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        };
        ApiError::new(kind, err.to_string())
    }
}

/// Malformed or mistyped request bodies
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorKind::InvalidArgument, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: ErrorInfo::new(self.kind.error_code(), self.message),
            request_id: self
                .request_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        };

        (self.kind.status_code(), Json(body)).into_response()
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/cards", get(list_cards))
        .route("/cards/:card_name", get(get_card_schema))
        .route("/generate", post(generate_cards))
        .route("/validate", post(validate_card))
        .route("/metrics", get(metrics))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Service banner
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Gift Card Format API".to_string(),
        current_time_est: giftcard_core::clock::display_eastern(chrono::Utc::now()),
        endpoints: ["/cards", "/generate", "/validate", "/health", "/metrics"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        status: "active".to_string(),
    })
}

/// GET /health - Health check
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let card_count = state.engine.catalog().len();
    Json(HealthResponse {
        status: if card_count > 0 { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        card_count,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// GET /cards - Supported product names
pub async fn list_cards(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.engine.list_products())
}

/// GET /cards/:card_name - Format rule for one product
pub async fn get_card_schema(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
    Path(card_name): Path<String>,
) -> Result<Json<&'static CardSchema>, ApiError> {
    let schema = state
        .engine
        .catalog()
        .lookup(&card_name)
        .map_err(|e| state.reject(e, &request_id))?;
    Ok(Json(schema))
}

/// POST /generate - Generate a batch of cards
///
/// The count is checked before the product name, and both before any card
/// is built.
pub async fn generate_cards(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Vec<GeneratedCard>>, ApiError> {
    let Json(request) = body.map_err(|e| state.reject(e, &request_id))?;
    let count = check_count(request.count).map_err(|e| state.reject(e, &request_id))?;

    let cards = state
        .engine
        .generate(&request.card_name, count)
        .map_err(|e| state.reject(e, &request_id))?;

    if let Some(metrics) = &state.metrics {
        metrics.record_generated(&request.card_name, cards.len());
    }

    tracing::info!(
        request_id = %request_id,
        card_name = %request.card_name,
        count = cards.len(),
        "Generated cards"
    );

    Ok(Json(cards))
}

/// POST /validate - Score a voucher and pin
pub async fn validate_card(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(request) = body.map_err(|e| state.reject(e, &request_id))?;
    let result = state
        .engine
        .validate(&request.card_name, &request.voucher, &request.pin)
        .map_err(|e| state.reject(e, &request_id))?;

    if let Some(metrics) = &state.metrics {
        metrics.record_validation(&request.card_name, result.valid);
    }

    tracing::info!(
        request_id = %request_id,
        card_name = %request.card_name,
        valid = result.valid,
        accuracy = result.accuracy,
        "Validated card"
    );

    Ok(Json(result))
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
) -> Result<Response, ApiError> {
    let Some(metrics) = &state.metrics else {
        return Err(ApiError::new(ErrorKind::NotFound, "Metrics are disabled")
            .with_request_id(request_id));
    };

    let text = metrics.render().map_err(|e| {
        ApiError::new(ErrorKind::InternalError, e.to_string()).with_request_id(&request_id)
    })?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], text).into_response())
}
