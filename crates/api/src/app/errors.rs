//! RFC 7807 problem responses.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use prepaid_core::DomainError;

pub const PROBLEM_JSON: &str = "application/problem+json";

/// Body of an `application/problem+json` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut res = (status, axum::Json(self)).into_response();
        res.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        res
    }
}

pub fn problem(status: StatusCode, detail: Option<String>) -> Response {
    ProblemDetails {
        kind: None,
        title: status.canonical_reason().unwrap_or("Error").to_string(),
        status: status.as_u16(),
        detail,
    }
    .into_response()
}

pub fn status_of(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidAmount | DomainError::InvalidId(_) | DomainError::Overflow => {
            StatusCode::BAD_REQUEST
        }
        DomainError::InsufficientFunds { .. }
        | DomainError::InsufficientBlockedFunds { .. }
        | DomainError::ExceedsBlockedAmount { .. }
        | DomainError::CardMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Persistence(_) | DomainError::IdGeneration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Map a domain error to a problem response. Server-side causes are logged and
/// never sent to the client.
pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = status_of(&err);
    if err.is_client_error() {
        problem(status, Some(err.to_string()))
    } else {
        tracing::error!(error = %err, "request failed");
        problem(status, None)
    }
}
