use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error response format
///
/// Every non-2xx response produced by the API (other than the empty
/// 401 challenge) carries this envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// When the error occurred
    pub timestamp: DateTime<Utc>,

    /// HTTP status code
    pub status: u16,

    /// HTTP reason phrase for the status code
    pub error: String,

    /// Numeric error code for client-side handling
    pub code: i32,

    /// Stable error identifier for client-side handling
    pub identifier: String,

    /// Human-readable description of the error
    pub message: String,

    /// Request path that produced the error
    pub path: String,
}
