//! Environment-driven configuration loading.
//!
//! # Design
//! - Read every variable through a lookup function so tests never touch the process environment.
//! - Treat blank values as absent and fall back to [`crate::defaults`].
//! - Catalog settings are all-or-nothing: a URL without an API key is rejected.

use std::net::IpAddr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, CatalogConfig, LoggingSettings};

const ENV_BIND_ADDR: &str = "GLIMPSE_BIND_ADDR";
const ENV_HTTP_PORT: &str = "GLIMPSE_HTTP_PORT";
const ENV_CATALOG_URL: &str = "GLIMPSE_CATALOG_URL";
const ENV_CATALOG_API_KEY: &str = "GLIMPSE_CATALOG_API_KEY";
const ENV_CATALOG_FOLDER: &str = "GLIMPSE_CATALOG_FOLDER";
const ENV_CATALOG_COLLECTION_TYPE: &str = "GLIMPSE_CATALOG_COLLECTION_TYPE";
const ENV_CATALOG_TIMEOUT_SECS: &str = "GLIMPSE_CATALOG_TIMEOUT_SECS";
const ENV_LOG_LEVEL: &str = "GLIMPSE_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "GLIMPSE_LOG_FORMAT";

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns an error when a variable is present but invalid, or when catalog
/// settings are incomplete.
pub fn load_from_env() -> ConfigResult<AppConfig> {
    load_with(|name| std::env::var(name).ok())
}

/// Load configuration using the supplied variable lookup.
///
/// # Errors
///
/// Returns an error when a variable is present but invalid, or when catalog
/// settings are incomplete.
pub fn load_with<F>(lookup: F) -> ConfigResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| {
        lookup(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let bind_addr = match read(ENV_BIND_ADDR) {
        Some(raw) => raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::invalid(ENV_BIND_ADDR, "not_an_ip_address", &raw))?,
        None => defaults::BIND_ADDR,
    };

    let http_port = match read(ENV_HTTP_PORT) {
        Some(raw) => parse_port(&raw)?,
        None => defaults::HTTP_PORT,
    };

    let catalog = match read(ENV_CATALOG_URL) {
        Some(raw_url) => {
            let base_url = parse_catalog_url(&raw_url)?;
            let api_key = read(ENV_CATALOG_API_KEY).ok_or(ConfigError::Missing {
                name: ENV_CATALOG_API_KEY,
            })?;
            let timeout_secs = match read(ENV_CATALOG_TIMEOUT_SECS) {
                Some(raw) => parse_timeout(&raw)?,
                None => defaults::CATALOG_TIMEOUT_SECS,
            };
            Some(CatalogConfig {
                base_url,
                api_key,
                folder_name: read(ENV_CATALOG_FOLDER)
                    .unwrap_or_else(|| defaults::CATALOG_FOLDER.to_string()),
                collection_type: read(ENV_CATALOG_COLLECTION_TYPE)
                    .unwrap_or_else(|| defaults::CATALOG_COLLECTION_TYPE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            })
        }
        None => {
            debug!("catalog url not configured; catalog synchronisation disabled");
            None
        }
    };

    let format = read(ENV_LOG_FORMAT).map(|raw| raw.to_ascii_lowercase());
    if let Some(value) = format.as_deref()
        && !matches!(value, "json" | "pretty")
    {
        return Err(ConfigError::invalid(
            ENV_LOG_FORMAT,
            "unknown_log_format",
            value,
        ));
    }

    Ok(AppConfig {
        bind_addr,
        http_port,
        catalog,
        logging: LoggingSettings {
            level: read(ENV_LOG_LEVEL).unwrap_or_else(|| defaults::LOG_LEVEL.to_string()),
            format,
        },
    })
}

fn parse_port(raw: &str) -> ConfigResult<u16> {
    let port = raw
        .parse::<u16>()
        .map_err(|_| ConfigError::invalid(ENV_HTTP_PORT, "not_a_port", raw))?;
    if port == 0 {
        return Err(ConfigError::invalid(ENV_HTTP_PORT, "zero", raw));
    }
    Ok(port)
}

fn parse_timeout(raw: &str) -> ConfigResult<u64> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(ENV_CATALOG_TIMEOUT_SECS, "zero", raw)),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError::invalid(
            ENV_CATALOG_TIMEOUT_SECS,
            "not_an_integer",
            raw,
        )),
    }
}

fn parse_catalog_url(raw: &str) -> ConfigResult<Url> {
    let mut url =
        Url::parse(raw).map_err(|_| ConfigError::invalid(ENV_CATALOG_URL, "unparseable", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            ENV_CATALOG_URL,
            "unsupported_scheme",
            raw,
        ));
    }
    // Relative joins replace the last segment unless the base ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
