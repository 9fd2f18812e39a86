use jiff::Timestamp;
use margin_core::{ShareCreated, SharedDocument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareResponse {
    pub code: String,
    pub url: String,
    pub expires_at: Timestamp,
}

impl From<ShareCreated> for CreateShareResponse {
    fn from(created: ShareCreated) -> Self {
        Self {
            code: created.code.to_string(),
            url: created.url,
            expires_at: created.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetShareResponse {
    pub markdown: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<SharedDocument> for GetShareResponse {
    fn from(doc: SharedDocument) -> Self {
        Self {
            markdown: doc.markdown,
            created_at: doc.created_at,
            expires_at: doc.expires_at,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}
