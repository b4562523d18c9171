use std::{env, fmt};

use super::{non_empty_var, DEFAULT_GREETING, DEFAULT_NAME};

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns the canonical name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub greeting: String,
    pub name: String,
    /// Greeting log location; `None` disables persistence.
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("DTIMELOG_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;

        let greeting = match non_empty_var("DTIMELOG_GREETING") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyGreeting),
            Some(value) => value,
            None => DEFAULT_GREETING.to_string(),
        };
        let name = non_empty_var("DTIMELOG_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
        let database_url = non_empty_var("DTIMELOG_DATABASE_URL");

        Ok(Self {
            environment,
            greeting,
            name,
            database_url,
        })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    EmptyGreeting,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "DTIMELOG_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::EmptyGreeting => write!(f, "DTIMELOG_GREETING must not be blank"),
        }
    }
}

impl std::error::Error for ConfigError {}
