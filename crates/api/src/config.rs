//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the agenda API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `AGENDA_OPEN`: First bookable time of day, `HH:MM` (default: "08:00")
//! - `AGENDA_CLOSE`: End of the working day, `HH:MM` (default: "19:00")
//! - `AGENDA_SLOT_MINUTES`: Display grid step in minutes (default: 30)

use agenda_core::scheduler::SlotGrid;
use chrono::NaiveTime;
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

const AGENDA_TIME_FORMAT: &str = "%H:%M";

/// Configuration for the agenda API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use agenda_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Working day and grid step used by the slot views
    pub slot_grid: SlotGrid,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The agenda hours or slot step are malformed or describe an empty day
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this function over the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var("LOG_LEVEL", "info").to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Agenda settings
        let open = parse_agenda_time("AGENDA_OPEN", &var("AGENDA_OPEN", "08:00"))?;
        let close = parse_agenda_time("AGENDA_CLOSE", &var("AGENDA_CLOSE", "19:00"))?;
        let step_minutes: i64 = var("AGENDA_SLOT_MINUTES", "30")
            .parse()
            .wrap_err("Invalid AGENDA_SLOT_MINUTES value")?;
        let slot_grid = SlotGrid::new(open, close, step_minutes)
            .wrap_err("Invalid agenda hours")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            slot_grid,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_agenda_time(key: &str, raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), AGENDA_TIME_FORMAT)
        .wrap_err_with(|| format!("Invalid {} value {:?}, expected HH:MM", key, raw))
}
