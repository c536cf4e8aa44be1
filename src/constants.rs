use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, used for uptime reporting.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const API_WELCOME_MESSAGE: &str = "Welcome to the Portfolio Web API!";

/// Largest JSON request body accepted, in bytes.
pub const MAX_JSON_BODY_BYTES: usize = 100 * 1024 * 1024;
