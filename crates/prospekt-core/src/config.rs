use url::Url;

use crate::app_config::{AppConfig, DEFAULT_BASE_URL};
use crate::ConfigError;

/// Reads crawler settings from the process environment. Loading a `.env`
/// file is left to the binary.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Builds an [`AppConfig`] from `lookup`. Every variable is optional and
/// falls back to its default when unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = parse_base_url(&or_default("PROSPEKT_BASE_URL", DEFAULT_BASE_URL))?;
    let user_agent = or_default("PROSPEKT_USER_AGENT", "prospekt/0.1 (brochure-crawler)");
    let log_level = or_default("PROSPEKT_LOG_LEVEL", "info");
    let connect_timeout_secs = parse_u64("PROSPEKT_CONNECT_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        base_url,
        user_agent,
        log_level,
        connect_timeout_secs,
    })
}

/// Normalizes a catalog base URL: must parse as an http(s) URL with a host.
/// Trailing slashes are removed so paths can be appended to it.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for `PROSPEKT_BASE_URL` when `raw`
/// is not an http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PROSPEKT_BASE_URL".to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(format!("\"{raw}\": {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("\"{raw}\" is not an http(s) URL")));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("\"{raw}\" has no host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("\"{raw}\" must not carry a query or fragment")));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
