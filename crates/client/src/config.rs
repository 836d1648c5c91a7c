//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Catalog API
//! - `CATALOG_BASE_URL` - API base URL (default: <https://api.celebratix.io>)
//! - `CATALOG_CHANNEL` - Sales channel id (default: 56wpw)
//! - `CATALOG_EVENTS_PATH` - Events list path (default: /v2/consumers/Events)
//! - `CATALOG_SHOP_PATH` - Shop tree path prefix (default: /shop/v2)
//! - `CATALOG_IMAGE_HOST` - Image host (default: <https://img.celebratix.io>)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `CATALOG_CACHE_TTL_SECS` - Shop cache TTL, 0 disables (default: 300)
//!
//! ## Local state
//! - `TICKETBOX_DATA_DIR` - Directory for persisted stores (default: .ticketbox)
//! - `TICKETBOX_COLOR_SCHEME` - System color scheme, `light` or `dark`
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use ticketbox_core::ColorScheme;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.celebratix.io";
const DEFAULT_CHANNEL: &str = "56wpw";
const DEFAULT_EVENTS_PATH: &str = "/v2/consumers/Events";
const DEFAULT_SHOP_PATH: &str = "/shop/v2";
const DEFAULT_IMAGE_HOST: &str = "https://img.celebratix.io";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_DATA_DIR: &str = ".ticketbox";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding persisted stores
    pub data_dir: PathBuf,
    /// Color scheme reported by the host system, if known
    pub system_color_scheme: Option<ColorScheme>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "development")
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Sales channel id sent with every request
    pub channel: String,
    /// Path of the events list endpoint
    pub events_path: String,
    /// Path prefix of the shop endpoint
    pub shop_path: String,
    /// Host serving cover images, without trailing slash
    pub image_host: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long fetched shops stay cached; zero disables the cache
    pub shop_cache_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            events_path: DEFAULT_EVENTS_PATH.to_string(),
            shop_path: DEFAULT_SHOP_PATH.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            shop_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl CatalogConfig {
    /// Configuration pointing at an arbitrary base URL, other settings default.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_slash(&base_url.into()),
            ..Self::default()
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_url_or_default("CATALOG_BASE_URL", DEFAULT_BASE_URL)?,
            channel: get_env_or_default("CATALOG_CHANNEL", DEFAULT_CHANNEL),
            events_path: get_path_or_default("CATALOG_EVENTS_PATH", DEFAULT_EVENTS_PATH),
            shop_path: get_path_or_default("CATALOG_SHOP_PATH", DEFAULT_SHOP_PATH),
            image_host: get_url_or_default("CATALOG_IMAGE_HOST", DEFAULT_IMAGE_HOST)?,
            timeout: Duration::from_secs(get_u64_or_default(
                "CATALOG_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            shop_cache_ttl: Duration::from_secs(get_u64_or_default(
                "CATALOG_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
        })
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default("TICKETBOX_DATA_DIR", DEFAULT_DATA_DIR));
        let system_color_scheme = get_optional_env("TICKETBOX_COLOR_SCHEME")
            .map(|value| {
                value.parse::<ColorScheme>().map_err(|e| {
                    ConfigError::InvalidEnvVar("TICKETBOX_COLOR_SCHEME".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            catalog,
            data_dir,
            system_color_scheme,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get an absolute URL, validated and stripped of its trailing slash.
fn get_url_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    validate_url(&value)
        .map(|()| trim_slash(&value))
        .map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

/// Get a path, ensuring exactly one leading slash and no trailing slash.
fn get_path_or_default(key: &str, default: &str) -> String {
    normalize_path(&get_env_or_default(key, default))
}

/// Get a non-negative integer.
fn get_u64_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn validate_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme `{other}`")),
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(())
}

fn trim_slash(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn normalize_path(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    format!("/{trimmed}")
}
