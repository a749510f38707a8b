//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the reframe backend:
//! - Auth endpoints (signup, login, logout, me, profile)
//! - Thought endpoints (list, create, bulk delete)
//! - CSV export endpoint
//! - Analytics summary endpoint
//! - Distortion taxonomy endpoint

pub mod analytics;
pub mod auth;
pub mod distortions;
pub mod export;
pub mod middleware;
pub mod thoughts;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Signup/login carry the strict per-IP limit
    let credential_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_rate_limit,
        ));

    // Routes that need a valid session
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/profile", put(auth::update_profile))
        .route("/thoughts", get(thoughts::list_thoughts))
        .route("/thoughts", post(thoughts::create_thought))
        .route("/thoughts", delete(thoughts::delete_all_thoughts))
        .route("/export/csv", get(export::export_csv))
        .route("/analytics/summary", get(analytics::get_summary))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Logout is deliberately outside the auth gate so it stays idempotent
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/distortions", get(distortions::list_distortions))
        .merge(protected_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::api_rate_limit,
        ))
        .merge(credential_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    // Cookie auth needs credentials, which rules out a wildcard origin
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
