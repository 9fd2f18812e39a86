mod health;
mod share;

pub use health::HealthResponse;
pub use share::{CreateShareResponse, ErrorResponse, GetShareResponse};
