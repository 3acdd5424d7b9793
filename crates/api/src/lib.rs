//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Session middleware
//! - The notification dispatcher invoked after entry creation

pub mod middleware;
pub mod notify;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use offertory_core::auth::CredentialStore;
use offertory_shared::JwtService;

use notify::Notifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for session token operations.
    pub jwt_service: Arc<JwtService>,
    /// Static credential store built from configuration.
    pub credentials: Arc<CredentialStore>,
    /// Best-effort notification dispatcher.
    pub notifier: Arc<Notifier>,
    /// Configured mobile carrier names offered by entry forms.
    pub operators: Arc<Vec<String>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
