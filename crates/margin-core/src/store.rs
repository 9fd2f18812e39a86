use crate::code::ShareCode;
use crate::error::Result;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifetime of every stored share, in seconds (7 days).
pub const SHARE_TTL_SECS: u64 = 604_800;

/// Lifetime of every stored share.
pub const SHARE_TTL: Duration = Duration::from_secs(SHARE_TTL_SECS);

/// A stored document.
///
/// Serialized as `{"markdown": ..., "createdAt": <unix millis>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// The shared Markdown document.
    pub markdown: String,
    /// When the share was created, at millisecond precision.
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: Timestamp,
}

impl ShareRecord {
    /// Creates a record, truncating `created_at` to the millisecond precision
    /// it is persisted with.
    pub fn new(markdown: impl Into<String>, created_at: Timestamp) -> Self {
        let created_at =
            Timestamp::from_millisecond(created_at.as_millisecond()).unwrap_or(created_at);
        Self {
            markdown: markdown.into(),
            created_at,
        }
    }

    /// When this record stops being retrievable.
    pub fn expires_at(&self) -> Timestamp {
        self.created_at + SignedDuration::from_secs(SHARE_TTL_SECS as i64)
    }
}

/// Outcome of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The record was written under the code.
    Reserved,
    /// A live record already holds the code; nothing was written.
    Occupied,
}

/// A read-only view of a share store.
#[async_trait]
pub trait ReadShareStore: Send + Sync + 'static {
    /// Retrieves the record for a given code.
    ///
    /// Returns `None` if the code was never written or its TTL has elapsed;
    /// the two cases are indistinguishable.
    async fn get(&self, code: &ShareCode) -> Result<Option<ShareRecord>>;

    /// Checks whether a live record holds the code.
    async fn exists(&self, code: &ShareCode) -> Result<bool> {
        Ok(self.get(code).await?.is_some())
    }
}

#[async_trait]
pub trait ShareStore: ReadShareStore {
    /// Writes a record under `code`, expiring after `ttl`.
    ///
    /// Overwrites any existing record.
    async fn put(&self, code: &ShareCode, record: &ShareRecord, ttl: Duration) -> Result<()>;

    /// Writes a record only if no live record holds `code`.
    ///
    /// The default implementation is a check-then-write and can race with a
    /// concurrent writer. Backends with an atomic create-if-absent primitive
    /// should override it.
    async fn put_if_absent(
        &self,
        code: &ShareCode,
        record: &ShareRecord,
        ttl: Duration,
    ) -> Result<Reservation> {
        if self.exists(code).await? {
            return Ok(Reservation::Occupied);
        }
        self.put(code, record, ttl).await?;
        Ok(Reservation::Reserved)
    }
}
