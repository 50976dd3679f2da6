use axum::{
    extract::OriginalUri,
    http::Method,
    middleware,
    routing::get,
    routing::post,
    Extension, Router,
};
use std::sync::Arc;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::handlers::{health, medical_data};
use crate::openapi::configure_swagger_routes;
use medical_data_service_domain::auth::{
    authorize, basic_auth_middleware, configure_security, UserRegistry,
};

type AppState = medical_data::MedicalDataService;

/// Create the application router
///
/// The registry of configured users is injected so the authentication
/// middleware never has to reach into the environment itself.
pub async fn create_app(users: Arc<UserRegistry>) -> Router {
    debug!("Creating application router");

    // Create medical data service using factory function
    let medical_data_service = medical_data::create_service();

    // Create health service using factory function
    let health_service = health::create_health_service();

    // Set up API routes; every one of them requires Basic credentials
    // and the USER role
    let api_routes = Router::new()
        // Define specific routes before parametrized routes to avoid conflicts
        .route(
            "/medical-data/patient/:patient_id",
            get(medical_data::get_medical_data_for_patient).fallback(handle_method_not_allowed),
        )
        .route(
            "/medical-data",
            post(medical_data::create_medical_data).fallback(handle_method_not_allowed),
        )
        .route(
            "/medical-data/:id",
            get(medical_data::get_medical_data_by_id).fallback(handle_method_not_allowed),
        )
        .layer(middleware::from_fn_with_state(
            medical_data_service.clone(),
            authorize::require_role::<AppState>("USER"),
        ))
        .layer(middleware::from_fn_with_state(
            users.clone(),
            basic_auth_middleware, // Authentication must happen before authorization
        ));

    debug!("API routes configured");

    // Set up public routes that don't require authentication
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    // Combine all routes
    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(handle_unknown_path)
        .with_state(medical_data_service);

    debug!("API routes nested");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Apply security configuration
    let app = configure_security(app);
    debug!("Security configuration applied");

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app
}

/// Fallback for paths that match a route but not its method
async fn handle_method_not_allowed(OriginalUri(uri): OriginalUri, method: Method) -> ApiError {
    debug!("Rejecting {} request to {}: method not supported", method, uri.path());
    ApiError::method_not_allowed(&method, uri.path())
}

/// Fallback for paths that match no route at all
async fn handle_unknown_path(OriginalUri(uri): OriginalUri) -> ApiError {
    debug!("Rejecting request to unknown path {}", uri.path());
    ApiError::not_found(
        format!("No resource found for path: {}", uri.path()),
        uri.path(),
    )
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}
