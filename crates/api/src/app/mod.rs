//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: card storage, event bus and the create-card service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response bodies
//! - `errors.rs`: problem+json error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use prepaid_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let cors = middleware::CorsState::new(&config.cors_allow_origin);
    let services = Arc::new(services::build_services(&config));

    // Outermost first: logging sees the final status, CORS covers the fallback too.
    Router::new()
        .nest("/api", routes::router())
        .route("/health", get(routes::system::health))
        .fallback(routes::system::not_found)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(axum::middleware::from_fn_with_state(cors, middleware::cors)),
        )
}
