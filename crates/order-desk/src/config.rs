//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORDER_DESK_BASE_URL` - Public URL order links are built on (default: `http://localhost:3000`)
//! - `ORDER_DESK_STORE_BUFFER` - Request buffer of each store actor (default: 32)
//! - `ORDER_DESK_HOLIDAYS` - Comma-separated ISO dates the shop is closed on top of public holidays (e.g. `2026-12-30,2026-12-31`)
//!
//! ## Optional (admin sign-in, set both or neither)
//! - `ORDER_DESK_ADMIN_EMAIL` - Admin account email
//! - `ORDER_DESK_ADMIN_PASSWORD` - Admin account password
//!
//! A `.env` file in the working directory is loaded first when present.

use chrono::NaiveDate;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STORE_BUFFER: &str = "32";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin sign-in credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Everything the process needs at start. Built once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub store_buffer: usize,
    pub holidays: Vec<NaiveDate>,
    /// `None` disables admin sign-in.
    pub admin: Option<AdminCredentials>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            store_buffer: 32,
            holidays: Vec::new(),
            admin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or only one of the admin credentials
    /// is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let base_url = env
            .get_or_default("ORDER_DESK_BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "ORDER_DESK_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let store_buffer = env
            .get_or_default("ORDER_DESK_STORE_BUFFER", DEFAULT_STORE_BUFFER)
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "ORDER_DESK_STORE_BUFFER".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let holidays = match env.get_optional("ORDER_DESK_HOLIDAYS") {
            Some(raw) => parse_holidays(&raw)?,
            None => Vec::new(),
        };

        let admin = match (
            env.get_optional("ORDER_DESK_ADMIN_EMAIL"),
            env.get_optional("ORDER_DESK_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminCredentials {
                email,
                password: SecretString::from(password),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar(
                    "ORDER_DESK_ADMIN_PASSWORD".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar(
                    "ORDER_DESK_ADMIN_EMAIL".to_string(),
                ))
            }
        };

        Ok(Self {
            base_url,
            store_buffer,
            holidays,
            admin,
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Unset and blank are the same thing.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }
}

fn parse_holidays(raw: &str) -> Result<Vec<NaiveDate>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidEnvVar("ORDER_DESK_HOLIDAYS".to_string(), format!("{s}: {e}"))
            })
        })
        .collect()
}
