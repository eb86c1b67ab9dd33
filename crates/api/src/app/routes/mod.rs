use axum::{Router, routing::get};

pub mod cards;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/version", get(system::version))
        .merge(cards::router())
}
