//! Share store backends.
//!
//! [`InMemoryShareStore`] keeps shares in process memory and enforces the
//! TTL lazily on read plus a periodic sweep. [`RedisShareStore`] relies on
//! Redis key expiry and `SET NX` for atomic reservations.

pub mod memory;
pub mod redis;

pub use margin_core::{ReadShareStore, Reservation, ShareStore, StorageError};
pub use memory::InMemoryShareStore;
pub use redis::{RedisShareStore, RedisStoreSettings};
