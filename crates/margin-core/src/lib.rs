//! Core types and traits for the Margin share-code service.
//!
//! This crate provides the share code type and its validator, the stored
//! record, the store contract and the [`Sharer`] trait that the HTTP
//! gateway talks to. Backends and the service implementation live in
//! their own crates.

pub mod clock;
pub mod code;
pub mod error;
pub mod share;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use code::ShareCode;
pub use error::{CoreError, ShareError, StorageError};
pub use share::{ShareCreated, SharedDocument, Sharer};
pub use store::{ReadShareStore, Reservation, ShareRecord, ShareStore, SHARE_TTL, SHARE_TTL_SECS};
