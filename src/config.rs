//! Configuration management for the Zephyr Scale MCP Server.

use std::time::Duration;

use crate::auth::BearerToken;
use crate::error::ConfigError;

/// Global Zephyr Scale Cloud API base URL.
pub const GLOBAL_BASE_URL: &str = "https://api.zephyrscale.smartbear.com/v2";

/// EU Zephyr Scale Cloud API base URL.
pub const EU_BASE_URL: &str = "https://eu.api.zephyrscale.smartbear.com/v2";

pub const TOKEN_VAR: &str = "ZEPHYR_API_TOKEN";
pub const EU_REGION_VAR: &str = "ZEPHYR_USE_EU_REGION";
pub const BASE_URL_VAR: &str = "ZEPHYR_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "ZEPHYR_TIMEOUT_SECONDS";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Upstream region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Global,
    Eu,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Global => "Global",
            Region::Eu => "EU",
        }
    }
}

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Static bearer token sent with every request.
    pub token: BearerToken,

    /// Selected upstream region.
    pub region: Region,

    /// Overrides the region's base URL (proxies, local mock servers).
    pub base_url_override: Option<String>,

    /// HTTP request timeout in seconds, identical for every method.
    pub timeout_seconds: u64,

    /// Enable debug mode for MCP message logging
    pub debug: bool,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField(TOKEN_VAR.into()))?;

        let region = match lookup(EU_REGION_VAR) {
            Some(flag) if flag.trim().eq_ignore_ascii_case("true") => Region::Eu,
            _ => Region::Global,
        };

        let base_url_override = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let timeout_seconds = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ConfigError::Invalid(format!("{} must be an integer, got '{}'", TIMEOUT_VAR, raw))
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be greater than zero",
                        TIMEOUT_VAR
                    )));
                }
                secs
            }
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            token: BearerToken::new(token),
            region,
            base_url_override,
            timeout_seconds,
            debug: false,
        })
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        if let Some(ref url) = self.base_url_override {
            return url;
        }
        match self.region {
            Region::Global => GLOBAL_BASE_URL,
            Region::Eu => EU_BASE_URL,
        }
    }

    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Configuration pointing at a local mock server.
    #[cfg(test)]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            token: BearerToken::new("test-token"),
            region: Region::Global,
            base_url_override: Some(base_url.trim_end_matches('/').to_string()),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            debug: false,
        }
    }
}
