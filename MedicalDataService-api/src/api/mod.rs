pub mod error;
pub mod handlers;
pub mod routes;


use axum::Router;
use medical_data_service_domain::auth::UserRegistry;
use std::sync::Arc;

/// Create the application router
pub async fn create_application(users: Arc<UserRegistry>) -> Router {
    routes::create_app(users).await
}
