use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use prepaid_core::CardId;
use prepaid_infra::CardRepository;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/card", post(create_card))
        .route("/card/:id", get(get_card))
}

pub async fn create_card(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.create_card().create_card() {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_card(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let card = id
        .parse::<CardId>()
        .and_then(|card_id| services.cards().get_card(card_id));

    match card {
        Ok(card) => Json(dto::CardView::from(&card)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
