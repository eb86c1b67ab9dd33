use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::Response};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn version(Extension(services): Extension<Arc<AppServices>>) -> Json<dto::VersionResponse> {
    Json(dto::VersionResponse {
        version: services.version().to_string(),
    })
}

pub async fn not_found() -> Response {
    errors::problem(StatusCode::NOT_FOUND, None)
}
