//! Client configuration
//!
//! Values come from built-in defaults, overridden by `HLOPG_*` environment
//! variables (e.g. `HLOPG_API_BASE_URL`, `HLOPG_REQUEST_TIMEOUT_SECS`).

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://www.hlopg.com/api";
const DEFAULT_ASSET_ORIGIN: &str = "https://www.hlopg.com";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "/assets/pg1.jpg";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_DELAY_MS: u64 = 250;
const DEFAULT_STORAGE_PATH: &str = ".hlopg/storage.json";
const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Configuration shared by every HloPG client component
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL every REST path is appended to
    pub api_base_url: String,
    /// Origin that relative image paths are resolved against
    pub asset_origin: String,
    /// Bundled asset shown when a listing has no usable image
    pub placeholder_image: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Pause before the single GET retry, in milliseconds
    pub retry_delay_ms: u64,
    /// JSON file backing the persisted session
    pub storage_path: String,
    /// Show the placeholder facility set for listings without facilities
    pub default_facilities: bool,
    /// Google userinfo endpoint used by the Google sign-in flow
    pub google_userinfo_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            asset_origin: DEFAULT_ASSET_ORIGIN.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            default_facilities: true,
            google_userinfo_url: DEFAULT_GOOGLE_USERINFO_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `HLOPG_API_BASE_URL`: REST base URL (default: "https://www.hlopg.com/api")
    /// - `HLOPG_ASSET_ORIGIN`: image origin (default: "https://www.hlopg.com")
    /// - `HLOPG_PLACEHOLDER_IMAGE`: fallback image (default: "/assets/pg1.jpg")
    /// - `HLOPG_REQUEST_TIMEOUT_SECS`: request timeout (default: 10)
    /// - `HLOPG_RETRY_DELAY_MS`: delay before retrying a GET (default: 250)
    /// - `HLOPG_STORAGE_PATH`: session file (default: ".hlopg/storage.json")
    /// - `HLOPG_DEFAULT_FACILITIES`: show placeholder facilities (default: true)
    /// - `HLOPG_GOOGLE_USERINFO_URL`: Google profile endpoint
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("asset_origin", DEFAULT_ASSET_ORIGIN)?
            .set_default("placeholder_image", DEFAULT_PLACEHOLDER_IMAGE)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("retry_delay_ms", DEFAULT_RETRY_DELAY_MS)?
            .set_default("storage_path", DEFAULT_STORAGE_PATH)?
            .set_default("default_facilities", true)?
            .set_default("google_userinfo_url", DEFAULT_GOOGLE_USERINFO_URL)?
            .add_source(Environment::with_prefix("HLOPG").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "HLOPG_API_BASE_URL",
            "HLOPG_REQUEST_TIMEOUT_SECS",
            "HLOPG_DEFAULT_FACILITIES",
        ] {
            // SAFETY: tests touching the environment run serially
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_client_config_defaults() {
        clear_env();
        let config = ClientConfig::from_env().expect("Failed to create client config");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_client_config_env_overrides() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("HLOPG_API_BASE_URL", "http://localhost:8080/api");
            std::env::set_var("HLOPG_REQUEST_TIMEOUT_SECS", "3");
            std::env::set_var("HLOPG_DEFAULT_FACILITIES", "false");
        }

        let config = ClientConfig::from_env().expect("Failed to create client config");
        clear_env();

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout_secs, 3);
        assert!(!config.default_facilities);
        assert_eq!(config.asset_origin, "https://www.hlopg.com");
    }
}
