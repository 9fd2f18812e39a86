use crate::code::ShareCode;
use crate::store::ShareRecord;
use async_trait::async_trait;
use jiff::Timestamp;

type Result<T> = std::result::Result<T, crate::error::ShareError>;

/// Returned by [`Sharer::create_share`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCreated {
    /// The code the document was stored under.
    pub code: ShareCode,
    /// Frontend URL that loads the share.
    pub url: String,
    /// When the share stops being retrievable.
    pub expires_at: Timestamp,
}

/// Returned by [`Sharer::get_share`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDocument {
    pub markdown: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<ShareRecord> for SharedDocument {
    fn from(record: ShareRecord) -> Self {
        let expires_at = record.expires_at();
        Self {
            markdown: record.markdown,
            created_at: record.created_at,
            expires_at,
        }
    }
}

#[async_trait]
pub trait Sharer: Send + Sync + 'static {
    /// Stores a Markdown document under a freshly generated code.
    async fn create_share(&self, markdown: String) -> Result<ShareCreated>;

    /// Looks up a document by a user-supplied code.
    ///
    /// Malformed input fails with `InvalidCode` without touching storage;
    /// unknown and expired codes both fail with `NotFound`.
    async fn get_share(&self, code: &str) -> Result<SharedDocument>;
}
