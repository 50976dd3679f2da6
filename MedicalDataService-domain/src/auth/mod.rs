//! Authentication module for the MedicalDataService API
//!
//! Provides HTTP Basic authentication middleware for securing API endpoints.
//! Credentials are checked against the static [`UserRegistry`] loaded at
//! process start; every request is authenticated independently and no
//! session state is kept.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Static user registry backing Basic authentication
pub mod users;

// Authorization middleware for RBAC
pub mod authorize;

// Structured logging of authentication events
pub mod logging;

pub use users::{ApplicationUser, UserRegistry, UserRegistryError};

use crate::auth::logging::{log_auth_event, log_failed_login, AuthEvent, AuthEventType};

/// User information extracted from authenticated requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID
    pub user_id: String,
    /// User roles
    pub roles: Vec<String>,
    /// Authentication source (always "basic" for this service)
    pub auth_source: String,
}

/// Build the 401 response sent for every authentication failure.
///
/// The body is deliberately empty; the challenge header is the only hint
/// given to the caller.
fn unauthorized_response() -> Response {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::WWW_AUTHENTICATE, "Basic realm=\"medical-data\"")
        .body(Body::empty())
        .unwrap_or_default()
}

/// Decode the credential pair from an `Authorization: Basic ...` header value
fn parse_basic_credentials(auth_header: &str) -> Option<(String, String)> {
    let encoded = auth_header.strip_prefix("Basic ")?;

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    // The password may itself contain ':', only the first one separates
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware that authenticates requests with HTTP Basic credentials
///
/// On success the resolved [`UserInfo`] is inserted into the request
/// extensions for downstream authorization checks. All failures produce an
/// empty 401 with a `WWW-Authenticate` challenge.
pub async fn basic_auth_middleware(
    State(registry): State<Arc<UserRegistry>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Get the request path for logging; nested routers see a stripped
    // URI, so prefer the original one recorded in the request extensions
    let request_path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    // Start timing the authentication process
    let start_time = std::time::Instant::now();

    // Extract the credentials from the Authorization header
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(auth_str) => auth_str,
            Err(_) => {
                warn!("Invalid Authorization header format");
                log_failed_login(None, &request_path, "Invalid Authorization header format");
                return unauthorized_response();
            }
        },
        None => {
            debug!("Missing Authorization header");
            log_failed_login(None, &request_path, "Missing Authorization header");
            return unauthorized_response();
        }
    };

    let (username, password) = match parse_basic_credentials(auth_header) {
        Some(credentials) => credentials,
        None => {
            warn!("Authorization header does not contain valid Basic credentials");
            log_failed_login(
                None,
                &request_path,
                "Authorization header does not contain valid Basic credentials",
            );
            return unauthorized_response();
        }
    };

    match registry.verify_credentials(&username, &password).await {
        Some(user) => {
            debug!("Credentials validated successfully for user: {}", user.username);

            // Log successful authentication
            let event = AuthEvent::new(AuthEventType::CredentialValidation, Some(&user.username), true)
                .with_details("Basic credential validation successful")
                .with_resource(request_path)
                .with_duration(start_time.elapsed().as_millis() as u64)
                .with_auth_method("basic");

            log_auth_event(event);

            // Add user info to request extensions
            let user_info = UserInfo {
                user_id: user.username.clone(),
                roles: user.roles.clone(),
                auth_source: "basic".to_string(),
            };

            req.extensions_mut().insert(user_info);

            // Continue with the request
            next.run(req).await
        }
        None => {
            warn!("Rejected Basic credentials for user: {}", username);
            log_failed_login(Some(&username), &request_path, "Invalid username or password");
            unauthorized_response()
        }
    }
}

/// Configure transport-level security for the application
///
/// Applies the CORS policy and the standard set of security response
/// headers to the whole router.
pub fn configure_security(app: axum::Router) -> axum::Router {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::set_header::SetResponseHeaderLayer;

    // Create CORS layer for the API endpoints
    let api_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    // Add security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            header::HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; script-src 'self'; connect-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline'; font-src 'self'; frame-ancestors 'none'; form-action 'self'; base-uri 'self'",
            ),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::HeaderName::from_static("referrer-policy"),
            header::HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::HeaderName::from_static("cross-origin-opener-policy"),
            header::HeaderValue::from_static("same-origin"),
        ));

    // Apply the security headers and CORS to the entire application
    app.layer(api_cors).layer(security_headers)
}
