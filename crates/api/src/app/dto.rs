use serde::{Deserialize, Serialize};

/// Card as returned by `GET /api/card/:id`; same shape as the creation response.
pub use prepaid_infra::CreateCardResponse as CardView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}
