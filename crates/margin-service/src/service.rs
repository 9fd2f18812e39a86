use crate::settings::ShareSettings;
use async_trait::async_trait;
use margin_core::{
    Clock, Reservation, ShareCode, ShareCreated, ShareError, ShareRecord, ShareStore,
    SharedDocument, Sharer, SystemClock, SHARE_TTL,
};
use margin_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A concrete implementation of the [`Sharer`] trait.
///
/// This service wraps a [`ShareStore`] and a [`Generator`] to handle:
/// - Code generation with a bounded collision retry
/// - Code validation before any store access
/// - Expiry timestamps derived from the fixed share TTL
///
/// Codes are reserved through [`ShareStore::put_if_absent`], so a live
/// share is never overwritten. Backends without an atomic primitive fall
/// back to check-then-write, which is best effort under concurrent creates.
#[derive(Debug, Clone)]
pub struct ShareService<S, G, C = SystemClock> {
    store: Arc<S>,
    generator: Arc<G>,
    clock: C,
    settings: ShareSettings,
}

impl<S: ShareStore, G: Generator> ShareService<S, G, SystemClock> {
    /// Creates a new `ShareService` on the wall clock.
    pub fn new(store: S, generator: G, settings: ShareSettings) -> Self {
        Self::with_clock(store, generator, settings, SystemClock)
    }
}

impl<S: ShareStore, G: Generator, C: Clock> ShareService<S, G, C> {
    /// Creates a new `ShareService` that timestamps shares with `clock`.
    ///
    /// A `max_attempts` of zero is raised to one; every create tries at least one code.
    pub fn with_clock(store: S, generator: G, mut settings: ShareSettings, clock: C) -> Self {
        settings.max_attempts = settings.max_attempts.max(1);
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            clock,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn settings(&self) -> &ShareSettings {
        &self.settings
    }

    fn generate_code(&self) -> ShareCode {
        self.generator.generate().into()
    }
}

#[async_trait]
impl<S: ShareStore, G: Generator, C: Clock> Sharer for ShareService<S, G, C> {
    async fn create_share(&self, markdown: String) -> Result<ShareCreated, ShareError> {
        if markdown.trim().is_empty() {
            return Err(ShareError::EmptyDocument);
        }

        let record = ShareRecord::new(markdown, self.clock.now());
        let attempts = self.settings.max_attempts;

        for attempt in 1..=attempts {
            let code = self.generate_code();

            match self.store.put_if_absent(&code, &record, SHARE_TTL).await? {
                Reservation::Reserved => {
                    info!(code = %code, bytes = record.markdown.len(), "created share");
                    return Ok(ShareCreated {
                        url: code.to_url(&self.settings.frontend_url),
                        expires_at: record.expires_at(),
                        code,
                    });
                }
                Reservation::Occupied => {
                    warn!(code = %code, attempt, "generated share code is taken, retrying");
                }
            }
        }

        Err(ShareError::CollisionExhausted { attempts })
    }

    async fn get_share(&self, code: &str) -> Result<SharedDocument, ShareError> {
        let code = ShareCode::parse(code)?;

        match self.store.get(&code).await? {
            Some(record) => {
                debug!(code = %code, "resolved share");
                Ok(record.into())
            }
            None => {
                debug!(code = %code, "share not found");
                Err(ShareError::NotFound)
            }
        }
    }
}
