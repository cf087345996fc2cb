use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

// Top-level configuration, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub restaurant_name: String,
    pub environment: String,
    pub rust_log: String,
}

// REST API backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Absolute root of the REST API, always ending in `/`.
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Admin session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Credential lifetime used when neither the login response nor the
    /// token itself says when it expires.
    pub idle_timeout_minutes: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("API_BASE_URL is missing")]
    MissingBaseUrl,

    #[error("API_BASE_URL must be an absolute http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
}

/// Longest accepted idle timeout, one year.
pub const MAX_IDLE_TIMEOUT_MINUTES: i64 = 525_600;
pub const MAX_TIMEOUT_SECONDS: u64 = 3_600;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                restaurant_name: var("RESTAURANT_NAME", "Tumba Bistro"),
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "tumba_bistro=info"),
            },
            api: ApiConfig {
                base_url: normalize_base_url(&var("API_BASE_URL", "https://localhost:7037/"))?,
                timeout_seconds: parse_in_range(
                    "API_TIMEOUT_SECONDS",
                    var("API_TIMEOUT_SECONDS", "30"),
                    1..=MAX_TIMEOUT_SECONDS,
                )?,
            },
            session: SessionConfig {
                idle_timeout_minutes: parse_in_range(
                    "SESSION_IDLE_TIMEOUT_MINUTES",
                    var("SESSION_IDLE_TIMEOUT_MINUTES", "60"),
                    1..=MAX_IDLE_TIMEOUT_MINUTES,
                )?,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                restaurant_name: "Tumba Bistro".to_string(),
                environment: "development".to_string(),
                rust_log: "tumba_bistro=info".to_string(),
            },
            api: ApiConfig {
                base_url: "https://localhost:7037/".to_string(),
                timeout_seconds: 30,
            },
            session: SessionConfig {
                idle_timeout_minutes: 60,
            },
        }
    }
}

fn parse_in_range<T>(key: &'static str, value: String, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    let parsed: T = match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            return Err(ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            })
        }
    };
    if !range.contains(&parsed) {
        return Err(ConfigError::InvalidValue {
            key,
            reason: format!("must be between {} and {}", range.start(), range.end()),
            value,
        });
    }
    Ok(parsed)
}

/// Checks that the base URL is absolute and makes sure it ends with `/` so
/// relative API paths join under it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let url = reqwest::Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
    }

    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.example.com/v1").unwrap(),
            "https://api.example.com/v1/"
        );
        assert_eq!(
            normalize_base_url(" http://localhost:5000/ ").unwrap(),
            "http://localhost:5000/"
        );
    }

    #[test]
    fn base_url_must_be_absolute_http() {
        assert!(matches!(normalize_base_url(""), Err(ConfigError::MissingBaseUrl)));
        assert!(matches!(
            normalize_base_url("api/bookings"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://files.example.com/"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api.base_url, "https://localhost:7037/");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.session.idle_timeout_minutes, 60);
        assert_eq!(config.app.restaurant_name, "Tumba Bistro");
    }

    #[test]
    fn idle_timeout_must_be_positive_and_bounded() {
        for bad in ["-5", "0", "525601", "9223372036854775807", "soon"] {
            let result = Config::from_lookup(lookup(&[("SESSION_IDLE_TIMEOUT_MINUTES", bad)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { key: "SESSION_IDLE_TIMEOUT_MINUTES", .. })),
                "{bad} was accepted"
            );
        }
        let config = Config::from_lookup(lookup(&[("SESSION_IDLE_TIMEOUT_MINUTES", " 525600 ")])).unwrap();
        assert_eq!(config.session.idle_timeout_minutes, MAX_IDLE_TIMEOUT_MINUTES);
    }

    #[test]
    fn zero_timeout_rejected() {
        for bad in ["0", "-1", "3601"] {
            assert!(matches!(
                Config::from_lookup(lookup(&[("API_TIMEOUT_SECONDS", bad)])),
                Err(ConfigError::InvalidValue { key: "API_TIMEOUT_SECONDS", .. })
            ));
        }
        let config = Config::from_lookup(lookup(&[("API_TIMEOUT_SECONDS", "1")])).unwrap();
        assert_eq!(config.api.timeout_seconds, 1);
    }
}
