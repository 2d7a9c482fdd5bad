//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default so the CLI runs against a local backend with no
//! setup. Timeouts are opt-in: when unset, reqwest's transport defaults apply
//! and no request deadline is imposed.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeouts: Timeouts,
    pub catalog_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), token: None, timeouts: Timeouts::default(), catalog_path: None }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `NEONEST_BASE_URL`: backend origin, default `http://127.0.0.1:3000`
    /// - `NEONEST_TOKEN`: session token restored at startup
    /// - `NEONEST_REQUEST_TIMEOUT_SECS`: whole-request deadline
    /// - `NEONEST_CONNECT_TIMEOUT_SECS`: connect deadline
    /// - `NEONEST_CATALOG_PATH`: JSON toy catalog replacing the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not an integer or the base URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(
            &std::env::var("NEONEST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        )?;
        let token = std::env::var("NEONEST_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let timeouts = Timeouts {
            request_secs: env_parse_opt("NEONEST_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_opt("NEONEST_CONNECT_TIMEOUT_SECS")?,
        };
        let catalog_path = std::env::var("NEONEST_CATALOG_PATH").ok().map(PathBuf::from);

        Ok(Self { base_url, token, timeouts, catalog_path })
    }
}

/// Trim trailing slashes and require an http(s) scheme.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for anything that is not `http://` or `https://`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn env_parse_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: raw }),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
