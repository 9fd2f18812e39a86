use clap::{Parser, ValueEnum};
use margin_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "MARGIN_LISTEN_ADDR";
pub const FRONTEND_URL_ENV: &str = "MARGIN_FRONTEND_URL";
pub const STORAGE_BACKEND_ENV: &str = "MARGIN_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "MARGIN_REDIS_URL";
pub const REDIS_TIMEOUT_MS_ENV: &str = "MARGIN_REDIS_TIMEOUT_MS";
pub const SWEEP_INTERVAL_SECS_ENV: &str = "MARGIN_SWEEP_INTERVAL_SECS";
pub const MAX_ATTEMPTS_ENV: &str = "MARGIN_MAX_ATTEMPTS";
pub const MAX_BODY_BYTES_ENV: &str = "MARGIN_MAX_BODY_BYTES";
pub const LOG_FORMAT_ENV: &str = "MARGIN_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "margin-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin of the frontend; share URLs point here and CORS allows it.
    #[arg(long, env = FRONTEND_URL_ENV, default_value = DEFAULT_FRONTEND_URL)]
    pub frontend_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    /// Upper bound on a single Redis round-trip.
    #[arg(long, env = REDIS_TIMEOUT_MS_ENV, default_value_t = 2_000)]
    pub redis_timeout_ms: u64,

    /// How often the in-memory backend drops expired shares.
    #[arg(long, env = SWEEP_INTERVAL_SECS_ENV, default_value_t = 300)]
    pub sweep_interval_secs: u64,

    /// Codes tried per create before giving up.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = margin_service::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    #[arg(
        long,
        env = MAX_BODY_BYTES_ENV,
        default_value_t = margin_gateway::config::DEFAULT_MAX_BODY_BYTES
    )]
    pub max_body_bytes: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
