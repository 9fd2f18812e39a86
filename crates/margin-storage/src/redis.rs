use async_trait::async_trait;
use margin_core::error::Result;
use margin_core::{ReadShareStore, Reservation, ShareCode, ShareRecord, ShareStore, StorageError};
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Settings for [`RedisShareStore`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisStoreSettings {
    /// Prefix for share keys (e.g., "margin:share:").
    #[builder(default = String::from("margin:share:"), setter(into))]
    pub key_prefix: String,
    /// Upper bound on every Redis round-trip.
    #[builder(default = Duration::from_secs(2))]
    pub op_timeout: Duration,
}

impl Default for RedisStoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A Redis-backed [`ShareStore`].
///
/// Records are stored as JSON strings with a native `EX` expiry, so Redis
/// itself hides expired shares. Reservations use `SET NX EX`, which is
/// atomic across concurrent writers.
#[derive(Debug, Clone)]
pub struct RedisShareStore {
    conn: redis::aio::MultiplexedConnection,
    settings: RedisStoreSettings,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        StorageError::Timeout(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisShareStore {
    /// Creates a store on top of an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection, settings: RedisStoreSettings) -> Self {
        Self { conn, settings }
    }

    /// Opens a multiplexed connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str, settings: RedisStoreSettings) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| StorageError::Unavailable(format!("invalid redis url: {e}")))?;

        let conn = match tokio::time::timeout(
            settings.op_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                return Err(StorageError::Unavailable(format!(
                    "failed to connect to Redis: {e}"
                )))
            }
            Err(_) => {
                return Err(StorageError::Timeout(format!(
                    "no connection to Redis within {:?}",
                    settings.op_timeout
                )))
            }
        };

        Ok(Self::new(conn, settings))
    }

    /// Generates the key for a share code.
    fn key(&self, code: &ShareCode) -> String {
        format!("{}{}", self.settings.key_prefix, code.as_str())
    }

    /// Runs a Redis call, failing with `Timeout` if it outlives `op_timeout`.
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.settings.op_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_redis_error(operation, e)),
            Err(_) => Err(StorageError::Timeout(format!(
                "{operation}: no reply within {:?}",
                self.settings.op_timeout
            ))),
        }
    }
}

fn encode(record: &ShareRecord) -> Result<String> {
    serde_json::to_string(record)
        .map_err(|e| StorageError::Serialization(format!("failed to serialize share: {e}")))
}

#[async_trait]
impl ReadShareStore for RedisShareStore {
    async fn get(&self, code: &ShareCode) -> Result<Option<ShareRecord>> {
        let key = self.key(code);
        trace!(code = %code, "fetching share from Redis");

        let mut conn = self.conn.clone();
        let raw = self
            .bounded(
                "failed to fetch share from Redis",
                conn.get::<_, Option<String>>(&key),
            )
            .await
            .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on get"))?;

        let Some(raw) = raw else {
            trace!(code = %code, "share not found in Redis");
            return Ok(None);
        };

        match serde_json::from_str::<ShareRecord>(&raw) {
            Ok(record) => {
                debug!(code = %code, "share found in Redis");
                Ok(Some(record))
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed to deserialize stored share");
                Err(StorageError::InvalidData(format!(
                    "invalid value for key '{key}': {e}"
                )))
            }
        }
    }

    async fn exists(&self, code: &ShareCode) -> Result<bool> {
        let key = self.key(code);
        let mut conn = self.conn.clone();
        self.bounded(
            "failed to check share in Redis",
            conn.exists::<_, bool>(&key),
        )
        .await
    }
}

#[async_trait]
impl ShareStore for RedisShareStore {
    async fn put(&self, code: &ShareCode, record: &ShareRecord, ttl: Duration) -> Result<()> {
        let key = self.key(code);
        let json = encode(record)?;

        let mut conn = self.conn.clone();
        self.bounded(
            "failed to write share to Redis",
            conn.set_ex::<_, _, ()>(&key, json, ttl.as_secs()),
        )
        .await
        .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on put"))?;

        debug!(code = %code, ttl_secs = ttl.as_secs(), "stored share in Redis");
        Ok(())
    }

    async fn put_if_absent(
        &self,
        code: &ShareCode,
        record: &ShareRecord,
        ttl: Duration,
    ) -> Result<Reservation> {
        let key = self.key(code);
        let json = encode(record)?;

        // SET NX replies OK when written and nil when the key already exists.
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(json).arg("NX").arg("EX").arg(ttl.as_secs());
        let reply: redis::Value = self
            .bounded(
                "failed to reserve share in Redis",
                cmd.query_async(&mut conn),
            )
            .await
            .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on reserve"))?;

        if matches!(reply, redis::Value::Nil) {
            debug!(code = %code, "share code already taken in Redis");
            return Ok(Reservation::Occupied);
        }

        debug!(code = %code, ttl_secs = ttl.as_secs(), "reserved share in Redis");
        Ok(Reservation::Reserved)
    }
}
