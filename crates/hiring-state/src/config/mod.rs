use std::env;
use std::fmt;

use crate::workflow::ValidationPolicy;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for binaries consuming the workflow-state contract.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub validation: ValidationPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("HIRING_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("HIRING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut validation = if read_flag("HIRING_STRICT_VALIDATION")?.unwrap_or(false) {
            ValidationPolicy::strict()
        } else {
            ValidationPolicy::structural()
        };
        if let Some(enabled) = read_flag("HIRING_REQUIRE_FEEDBACK_WITH_DECISION")? {
            validation.require_feedback_with_decision = enabled;
        }
        if let Some(enabled) = read_flag("HIRING_REQUIRE_ROUND_CONSISTENCY")? {
            validation.require_round_consistency = enabled;
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            validation,
        })
    }
}

fn read_flag(name: &'static str) -> Result<Option<bool>, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
