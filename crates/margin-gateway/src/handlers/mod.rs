mod health;
mod share;

pub use health::health_handler;
pub use share::{create_share_handler, get_share_handler, not_found_handler};
