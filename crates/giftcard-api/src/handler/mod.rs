//! HTTP handler module
//!
//! Thin axum surface over [`giftcard_core::CardEngine`]:
//! - `routes`: route definitions, shared state and error mapping
//! - `middleware`: request logging
//!
//! Success bodies are the engine's own result types serialized as JSON.
//! Failures use [`ErrorResponse`].

pub mod middleware;
pub mod routes;

pub use middleware::request_logging_middleware;
pub use routes::{create_router, ApiError, AppState};

use serde::{Deserialize, Serialize};

/// Body of `POST /generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub card_name: String,
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

/// Body of `POST /validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub card_name: String,
    pub voucher: String,
    pub pin: String,
}

/// Error body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorInfo,
    pub request_id: String,
}

/// Error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    /// e.g. `2024-07-04 03:15:00 PM EDT`
    pub current_time_est: String,
    pub endpoints: Vec<String>,
    pub status: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub card_count: usize,
    pub uptime_seconds: u64,
}
