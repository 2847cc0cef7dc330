//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` in `main`.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Serialize;

use crate::pricing::RateUnitPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Settings the pricing handlers need on every request
#[derive(Debug, Clone, Serialize)]
pub struct PricingSettings {
    pub currency_code: String,
    /// Display-only glyph used in breakdown strings
    pub currency_symbol: String,
    pub rate_unit_policy: RateUnitPolicy,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            currency_code: "NGN".to_string(),
            currency_symbol: "₦".to_string(),
            rate_unit_policy: RateUnitPolicy::Flat,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub cache_refresh: Duration,
    /// Allowed CORS origins; empty means permissive (development only)
    pub cors_origins: Vec<String>,
    pub pricing: PricingSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr: SocketAddr = parse_or(var("BIND_ADDR"), "BIND_ADDR", "0.0.0.0:8080".parse().ok())?;
        let db_max_connections: u32 = parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", Some(5))?;
        let refresh_secs: u64 = parse_or(var("CACHE_REFRESH_SECS"), "CACHE_REFRESH_SECS", Some(600))?;
        if refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "CACHE_REFRESH_SECS",
                message: "must be greater than zero".to_string(),
            });
        }
        let rate_unit_policy = parse_or(
            var("HIRING_RATE_UNITS"),
            "HIRING_RATE_UNITS",
            Some(RateUnitPolicy::Flat),
        )?;

        let defaults = PricingSettings::default();
        let pricing = PricingSettings {
            currency_code: var("CURRENCY_CODE").unwrap_or(defaults.currency_code),
            currency_symbol: var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            rate_unit_policy,
        };

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            cache_refresh: Duration::from_secs(refresh_secs),
            cors_origins,
            pricing,
        })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Missing(name)),
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/transit")]))
            .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.cache_refresh, Duration::from_secs(600));
        assert_eq!(config.pricing.currency_code, "NGN");
        assert_eq!(config.pricing.currency_symbol, "₦");
        assert_eq!(config.pricing.rate_unit_policy, RateUnitPolicy::Flat);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("HIRING_RATE_UNITS", "metered"),
            ("CURRENCY_CODE", "GHS"),
            ("CURRENCY_SYMBOL", "GH₵"),
            ("CORS_ORIGINS", "http://localhost:5173, https://admin.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.pricing.rate_unit_policy, RateUnitPolicy::Metered);
        assert_eq!(config.pricing.currency_code, "GHS");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_invalid_policy() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("HIRING_RATE_UNITS", "hourly"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "HIRING_RATE_UNITS", .. }));
    }

    #[test]
    fn test_zero_refresh_interval() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("CACHE_REFRESH_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CACHE_REFRESH_SECS", .. }));
    }
}
