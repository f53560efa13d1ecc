use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use time::Duration;
use tracing::info;

#[derive(Debug, Error)]
#[error("invalid value for {key}: {message}")]
pub struct ConfigError {
    key: &'static str,
    message: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_minutes: i64 = parse_or(&lookup, "SUPPORTLY_SESSION_TTL_MINUTES", 120)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError {
                key: "SUPPORTLY_SESSION_TTL_MINUTES",
                message: "must be positive".into(),
            });
        }

        Ok(Self {
            host: lookup("SUPPORTLY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "SUPPORTLY_PORT", 3000)?,
            cookie_name: lookup("SUPPORTLY_COOKIE_NAME")
                .unwrap_or_else(|| "supportly_session".into()),
            secure_cookie: parse_or(&lookup, "SUPPORTLY_SECURE_COOKIE", false)?,
            session_ttl: Duration::minutes(ttl_minutes),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError {
            key,
            message: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
