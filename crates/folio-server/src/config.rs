use std::str::FromStr;
use std::time::Duration;

use folio_core::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
    pub block_private_urls: bool,
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            block_private_urls: false,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `FOLIO_HOST` (optional, defaults to `0.0.0.0`)
    /// - `FOLIO_PORT` (optional, defaults to 5000)
    /// - `FOLIO_FETCH_TIMEOUT_SECS` (optional, defaults to 30)
    /// - `FOLIO_BLOCK_PRIVATE_URLS` (optional, defaults to false; accepts
    ///   true/false, yes/no, y/n, t/f, on/off, 1/0)
    /// - `FOLIO_MAX_REQUEST_BYTES` (optional, defaults to 65536)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = lookup("FOLIO_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port: u16 = parse_or(&lookup, "FOLIO_PORT", defaults.port)?;
        if port == 0 {
            return Err(AppError::ConfigError("FOLIO_PORT must be at least 1".into()));
        }

        let timeout_secs: u64 =
            parse_or(&lookup, "FOLIO_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "FOLIO_FETCH_TIMEOUT_SECS must be at least 1".into(),
            ));
        }

        let block_private_urls = match lookup("FOLIO_BLOCK_PRIVATE_URLS") {
            None => defaults.block_private_urls,
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Invalid FOLIO_BLOCK_PRIVATE_URLS '{raw}': expected true/false, yes/no, on/off or 1/0"
                ))
            })?,
        };

        let max_request_bytes: usize =
            parse_or(&lookup, "FOLIO_MAX_REQUEST_BYTES", defaults.max_request_bytes)?;
        if max_request_bytes == 0 {
            return Err(AppError::ConfigError(
                "FOLIO_MAX_REQUEST_BYTES must be at least 1".into(),
            ));
        }

        Ok(Self {
            host,
            port,
            fetch_timeout: Duration::from_secs(timeout_secs),
            block_private_urls,
            max_request_bytes,
        })
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("Invalid {key} '{raw}': must be a positive integer"))
        }),
    }
}

/// Same spellings the `folio` CLI accepts for its boolean flags.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}
