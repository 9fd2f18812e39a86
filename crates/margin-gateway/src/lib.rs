//! HTTP surface of the Margin share service.
//!
//! Routes:
//! - `POST /api/share` stores a Markdown body and returns its code
//! - `GET /api/share/{code}` returns a stored document
//! - `GET /health` liveness probe

pub mod app;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use config::GatewayConfig;
pub use error::AppError;
pub use state::AppState;
