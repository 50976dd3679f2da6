use async_trait::async_trait;
use axum::{
    extract::{FromRequest, OriginalUri, Request},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::entities::common::ErrorResponse;

/// Catalog of the error conditions the API reports to clients
///
/// Each condition maps to an HTTP status, a numeric code and a stable
/// string identifier that clients can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidArgument,
    InvalidJson,
    NotFound,
    MethodNotAllowed,
    AccessDenied,
    InternalServerError,
}

impl ErrorCode {
    /// HTTP status the condition is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::AccessDenied => StatusCode::FORBIDDEN,
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric error code carried in the response envelope
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationFailed => 4000,
            ErrorCode::InvalidArgument => 4001,
            ErrorCode::InvalidJson => 4002,
            ErrorCode::NotFound => 4040,
            ErrorCode::MethodNotAllowed => 4050,
            ErrorCode::AccessDenied => 4030,
            ErrorCode::InternalServerError => 5000,
        }
    }

    /// Stable string identifier carried in the response envelope
    pub fn identifier(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "ERR_VALIDATION_FAILED",
            ErrorCode::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ErrorCode::InvalidJson => "ERR_INVALID_JSON",
            ErrorCode::NotFound => "ERR_NOT_FOUND",
            ErrorCode::MethodNotAllowed => "ERR_METHOD_NOT_ALLOWED",
            ErrorCode::AccessDenied => "ERR_ACCESS_DENIED",
            ErrorCode::InternalServerError => "ERR_INTERNAL_SERVER_ERROR",
        }
    }
}

/// An API-level error that renders as the standard error envelope
#[derive(Debug, Clone)]
pub struct ApiError {
    error_code: ErrorCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(error_code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Field-level validation failure on a request payload
    pub fn validation_failed(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message, path)
    }

    /// Semantically invalid argument, such as an inconsistent measurement
    /// or a malformed identifier
    pub fn invalid_argument(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message, path)
    }

    /// Request body could not be parsed as the expected JSON shape
    pub fn invalid_json(path: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidJson,
            "Malformed JSON request. Please ensure the JSON is correctly formatted.",
            path,
        )
    }

    /// Requested entity does not exist
    pub fn not_found(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, path)
    }

    /// HTTP method is not supported on the requested endpoint
    pub fn method_not_allowed(method: &Method, path: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MethodNotAllowed,
            format!("The {} method is not supported for this endpoint.", method),
            path,
        )
    }

    /// Unexpected failure that should not expose internal details
    pub fn internal(path: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalServerError,
            "An unexpected error occurred. Please contact support.",
            path,
        )
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error_code.status_code();
        let envelope = ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            code: self.error_code.code(),
            identifier: self.error_code.identifier().to_string(),
            message: self.message,
            path: self.path,
        };

        (status, Json(envelope)).into_response()
    }
}

/// JSON extractor that validates the payload after deserializing it
///
/// Rejections render as the standard error envelope: an unparsable body
/// becomes an invalid-JSON error, a parsed body that fails field
/// validation becomes a validation error listing the offending fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // The router strips the nest prefix from req.uri(), so prefer the
        // original URI recorded in the request extensions.
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejecting unreadable request body on {}: {}", path, rejection.body_text());
            ApiError::invalid_json(path.clone())
        })?;

        if let Err(errors) = value.validate() {
            let message = format_validation_errors(&errors);
            debug!("Rejecting invalid request body on {}: {}", path, message);
            return Err(ApiError::validation_failed(message, path));
        }

        Ok(ValidatedJson(value))
    }
}

/// Flatten validation errors into a single "field: message" listing
///
/// Nested structs contribute dotted field paths. Entries are sorted so
/// the resulting message is deterministic.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_validation_errors(errors, None, &mut parts);
    parts.sort();
    parts.join(", ")
}

fn collect_validation_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field_name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, camel_case(field)),
            None => camel_case(field),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .clone()
                        .unwrap_or_else(|| error.code.clone());
                    out.push(format!("{}: {}", field_name, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_errors(nested, Some(&field_name), out);
            }
            ValidationErrorsKind::List(nested_list) => {
                for (index, nested) in nested_list {
                    let indexed = format!("{}[{}]", field_name, index);
                    collect_validation_errors(nested, Some(&indexed), out);
                }
            }
        }
    }
}

/// Convert a struct field name to the camelCase form used on the wire
fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
