pub mod config;

use std::env;

pub use config::{AppConfig, ConfigError, Environment};

pub const DEFAULT_GREETING: &str = "Hello";
pub const DEFAULT_NAME: &str = "David";

/// Loads environment variables from `.env` when available.
///
/// Missing files are ignored so the function is safe in release builds
/// where dotenv files are not shipped.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}

/// Returns the value of `key`, treating unset and empty variables alike.
pub fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
