use actix_cors::Cors;

use crate::settings::AppConfig;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Any origin is allowed unless the configuration lists explicit origins.
pub fn build_cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(CORS_MAX_AGE_SECS);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config.cors_origins()
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
