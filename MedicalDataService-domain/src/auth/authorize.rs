use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use futures::future::BoxFuture;
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::logging::{log_access_denied, log_auth_event, AuthEvent, AuthEventType};
use crate::auth::UserInfo;

/// Middleware for role-based access control
///
/// This middleware checks if the authenticated user has any of the required roles.
/// If the user lacks all required roles, they are denied access with a 403 Forbidden
/// response carrying the standard error envelope.
pub async fn require_roles<S, I>(
    _state: State<S>,
    req: Request<Body>,
    next: Next,
    required_roles: I,
) -> Response
where
    I: IntoIterator<Item = String>,
{
    // Convert required_roles into a Vec for easier processing and logging
    let required_roles: Vec<String> = required_roles.into_iter().collect();

    // Nested routers see a stripped URI, so prefer the original one
    // recorded in the request extensions
    let request_path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    // Extract user info from request extensions
    let user_info = req.extensions().get::<UserInfo>();

    match user_info {
        Some(user) => {
            // Check if user has any of the required roles
            let has_required_role = required_roles.iter().any(|role| user.roles.contains(role));

            if has_required_role {
                debug!(
                    "User {} has required role for resource access: {}",
                    user.user_id, request_path
                );

                // Log successful authorization
                let event = AuthEvent::new(AuthEventType::Authorization, Some(&user.user_id), true)
                    .with_details(format!("User authorized to access: {}", request_path))
                    .with_resource(request_path)
                    .with_auth_method("rbac");

                log_auth_event(event);

                // User has permission, continue with the request
                next.run(req).await
            } else {
                warn!(
                    "User {} lacks required roles: {:?} for resource: {}",
                    user.user_id, required_roles, request_path
                );

                // Log the access denied event
                log_access_denied(&user.user_id, &request_path, &required_roles);

                // User does not have required role
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "timestamp": Utc::now().to_rfc3339(),
                        "status": 403,
                        "error": "Forbidden",
                        "code": 4030,
                        "identifier": "ERR_ACCESS_DENIED",
                        "message": "You do not have permission to access this resource.",
                        "path": request_path
                    })),
                )
                    .into_response()
            }
        }
        None => {
            // No user info in request extensions, this should never happen
            // as the auth middleware runs before this middleware
            warn!("No user info found in request extensions for path: {}", request_path);

            // Log the error
            let event = AuthEvent::new(AuthEventType::AccessDenied, None, false)
                .with_details("Authentication context missing in request extensions")
                .with_resource(request_path.clone())
                .with_auth_method("rbac");

            log_auth_event(event);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "timestamp": Utc::now().to_rfc3339(),
                    "status": 500,
                    "error": "Internal Server Error",
                    "code": 5000,
                    "identifier": "ERR_INTERNAL_SERVER_ERROR",
                    "message": "An unexpected error occurred. Please contact support.",
                    "path": request_path
                })),
            )
                .into_response()
        }
    }
}

/// Middleware factory that requires a specific role for access
///
/// This is a convenience function that creates a middleware requiring a specific role.
///
/// # Example
/// ```ignore
/// let data_routes = Router::new()
///    .route("/medical-data", post(create_handler))
///    .layer(middleware::from_fn_with_state(
///        app_state.clone(),
///        require_role("USER")
///    ));
/// ```
pub fn require_role<S: Clone + Send + Sync + 'static>(
    role: &str,
) -> impl Fn(State<S>, Request<Body>, Next) -> BoxFuture<'static, Response> + Clone + Send + 'static {
    let role = role.to_string();
    move |state, req, next| {
        let role_vec = vec![role.clone()];
        let fut = async move { require_roles(state, req, next, role_vec).await };
        Box::pin(fut)
    }
}
