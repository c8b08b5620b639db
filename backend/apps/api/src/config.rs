//! Server Configuration
//!
//! Read once from the environment at startup. Missing required values and
//! unparsable numbers fail startup instead of falling back silently.

use platform::rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_SITE_NAME: &str = "aItoolfinder";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Holds secrets, so no `Debug`
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub admin_secret: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub rate_limit: RateLimitConfig,
    /// How often expired rate limit windows are purged
    pub rate_limit_sweep: Duration,
    pub site_name: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        fn parsed<T: std::str::FromStr>(
            key: &'static str,
            raw: Option<String>,
            default: T,
        ) -> Result<T, ConfigError> {
            match raw {
                None => Ok(default),
                Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
            }
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let max_requests = parsed("RATE_LIMIT_MAX_REQUESTS", get("RATE_LIMIT_MAX_REQUESTS"), 100u32)?;
        let window_secs = parsed("RATE_LIMIT_WINDOW_SECS", get("RATE_LIMIT_WINDOW_SECS"), 60u64)?;
        let rate_limit = RateLimitConfig::new(max_requests, window_secs);
        if !rate_limit.is_valid() {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_MAX_REQUESTS/RATE_LIMIT_WINDOW_SECS",
                value: format!("{max_requests}/{window_secs}"),
            });
        }

        let sweep_secs = parsed("RATE_LIMIT_SWEEP_SECS", get("RATE_LIMIT_SWEEP_SECS"), 300u64)?;
        if sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_SWEEP_SECS",
                value: "0".to_string(),
            });
        }

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                5,
            )?,
            admin_secret: required("ADMIN_SECRET")?,
            bind_addr,
            frontend_origins,
            rate_limit,
            rate_limit_sweep: Duration::from_secs(sweep_secs),
            site_name: get("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/toolfinder"),
        ("ADMIN_SECRET", "s3cret"),
    ];

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:31113".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.rate_limit_sweep, Duration::from_secs(300));
        assert_eq!(config.site_name, "aItoolfinder");
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("RATE_LIMIT_MAX_REQUESTS", "10"),
            ("RATE_LIMIT_WINDOW_SECS", "30"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]);
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window, Duration::from_secs(30));
        assert_eq!(config.frontend_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_missing_required() {
        let err = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "x")])).err();
        assert_eq!(err, Some(ConfigError::Missing("ADMIN_SECRET")));

        let err = ServerConfig::from_lookup(lookup(&[("ADMIN_SECRET", "  ")])).err();
        assert_eq!(err, Some(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_numbers() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RATE_LIMIT_MAX_REQUESTS", "lots"));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { key: "RATE_LIMIT_MAX_REQUESTS", .. })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RATE_LIMIT_MAX_REQUESTS", "0"));
        assert!(ServerConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
