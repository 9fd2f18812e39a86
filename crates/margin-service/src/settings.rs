use typed_builder::TypedBuilder;

/// How many codes are tried before a create gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Deployment settings for [`ShareService`](crate::ShareService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShareSettings {
    /// Origin of the frontend that loads shares, e.g. `https://margin.example`.
    #[builder(setter(into))]
    pub frontend_url: String,
    /// Collision retry budget per create.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}
