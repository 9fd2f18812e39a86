use typed_builder::TypedBuilder;

/// Origins of local frontend dev servers, always allowed by CORS.
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:4173"];

/// Default cap on request bodies (5 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, TypedBuilder)]
pub struct GatewayConfig {
    /// Origin of the deployed frontend.
    #[builder(setter(into))]
    pub frontend_url: String,
    /// Additional origins allowed to call `/api/*`.
    #[builder(default = DEV_ORIGINS.iter().map(|o| o.to_string()).collect())]
    pub extra_origins: Vec<String>,
    #[builder(default = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    /// Every origin allowed by CORS, without trailing slashes.
    pub fn allowed_origins(&self) -> Vec<String> {
        std::iter::once(&self.frontend_url)
            .chain(self.extra_origins.iter())
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect()
    }
}
