/// Portal configuration module
/// All runtime configuration is resolved once in `main` and injected into
/// the application state; nothing reads the environment after startup.
use std::env;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Submission window boundaries, as month/day/hour-of-day in UTC.
///
/// The year is never part of the configuration: the gate always resolves
/// these values against the year of the incoming request's clock.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    pub open_month: u32,
    pub open_day: u32,
    pub open_hour: u32,
    pub close_month: u32,
    pub close_day: u32,
    pub close_hour: u32,
}

impl WindowConfig {
    pub fn new(
        open_month: u32,
        open_day: u32,
        open_hour: u32,
        close_month: u32,
        close_day: u32,
        close_hour: u32,
    ) -> Result<Self, ConfigError> {
        for (name, value, max) in [
            ("open month", open_month, 12),
            ("close month", close_month, 12),
            ("open day", open_day, 31),
            ("close day", close_day, 31),
        ] {
            if value < 1 || value > max {
                return Err(ConfigError::InvalidConfig(format!(
                    "{} must be between 1 and {}, got {}",
                    name, max, value
                )));
            }
        }
        for (name, value) in [("open hour", open_hour), ("close hour", close_hour)] {
            if value > 23 {
                return Err(ConfigError::InvalidConfig(format!(
                    "{} must be between 0 and 23, got {}",
                    name, value
                )));
            }
        }
        if (close_month, close_day, close_hour) <= (open_month, open_day, open_hour) {
            return Err(ConfigError::InvalidConfig(
                "submission window must close after it opens".to_string(),
            ));
        }
        Ok(WindowConfig {
            open_month,
            open_day,
            open_hour,
            close_month,
            close_day,
            close_hour,
        })
    }

    /// Load window configuration from environment variables.
    ///
    /// Defaults to the finals evening: March 14, 20:00 UTC through
    /// March 15, 00:00 UTC.
    pub fn from_env() -> Result<Self, ConfigError> {
        let window = Self::new(
            env_u32("SUBMISSION_OPEN_MONTH", 3)?,
            env_u32("SUBMISSION_OPEN_DAY", 14)?,
            env_u32("SUBMISSION_OPEN_HOUR", 20)?,
            env_u32("SUBMISSION_CLOSE_MONTH", 3)?,
            env_u32("SUBMISSION_CLOSE_DAY", 15)?,
            env_u32("SUBMISSION_CLOSE_HOUR", 0)?,
        )?;

        info!(
            "Submission window configured: {:02}-{:02} {:02}:00 through {:02}-{:02} {:02}:00 UTC",
            window.open_month,
            window.open_day,
            window.open_hour,
            window.close_month,
            window.close_day,
            window.close_hour
        );

        Ok(window)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let connection_string = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnv("DATABASE_URL".to_string()))?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid max_connections: {}", e)))?;

        debug!(
            "Database configuration loaded: max_connections={}",
            max_connections
        );

        Ok(DatabaseConfig {
            connection_string,
            max_connections,
        })
    }
}

/// Service configuration combining all settings
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub database: DatabaseConfig,
    pub bind_port: u16,
    pub window: WindowConfig,
}

impl PortalConfig {
    /// Load full service configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_env()?;
        let window = WindowConfig::from_env()?;

        let bind_port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid port: {}", e)))?;

        info!("Service configuration loaded: port={}", bind_port);

        Ok(PortalConfig {
            database,
            bind_port,
            window,
        })
    }
}

fn env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
