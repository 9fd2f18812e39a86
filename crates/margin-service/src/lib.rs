//! Share service implementation.
//!
//! [`ShareService`] ties a [`Generator`](margin_generator::Generator) and a
//! [`ShareStore`](margin_core::ShareStore) together behind the
//! [`Sharer`](margin_core::Sharer) trait.

pub mod service;
pub mod settings;

pub use service::ShareService;
pub use settings::{ShareSettings, DEFAULT_MAX_ATTEMPTS};
