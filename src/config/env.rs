// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Environment-backed application configuration.
//!
//! All configuration comes from environment variables and is validated in a
//! single pass at startup. Every problem found is reported together so an
//! operator can fix the whole environment at once.
//!
//! | Variable                 | Required | Default     |
//! |--------------------------|----------|-------------|
//! | `EDITCHAIN_HOST`         | no       | `127.0.0.1` |
//! | `EDITCHAIN_PORT`         | no       | `3001`      |
//! | `EDITCHAIN_DATA_DIR`     | no       | `data`      |
//! | `EDITCHAIN_ENV`          | no       | `development` |
//! | `JWT_SECRET`             | yes      | -           |
//! | `JWT_EXPIRES_IN`         | no       | `15m`       |
//! | `JWT_REFRESH_SECRET`     | yes      | -           |
//! | `JWT_REFRESH_EXPIRES_IN` | no       | `7d`        |
//! | `GEMINI_API_KEY`         | no       | -           |
//! | `OPENAI_API_KEY`         | no       | -           |
//!
//! Provider keys are optional at startup; generation requests against a
//! provider without a key fail per-request instead.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_ACCESS_TTL, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REFRESH_TTL,
    MIN_SECRET_LEN,
};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// API keys for external image-generation providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// Complete runtime configuration, validated once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub providers: ProviderConfig,
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Load from an explicit variable map. Split out for tests.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut problems = Vec::new();

        let host = vars
            .get("EDITCHAIN_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match vars.get("EDITCHAIN_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    problems.push(format!("EDITCHAIN_PORT is not a valid port: '{raw}'"));
                    DEFAULT_PORT
                }
            },
        };

        let data_dir = vars
            .get("EDITCHAIN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let environment = match vars.get("EDITCHAIN_ENV").map(String::as_str) {
            None | Some("development") => Environment::Development,
            Some("test") => Environment::Test,
            Some("production") => Environment::Production,
            Some(other) => {
                problems.push(format!(
                    "EDITCHAIN_ENV must be development, test or production, got '{other}'"
                ));
                Environment::Development
            }
        };

        let secret = require_secret(vars, "JWT_SECRET", &mut problems);
        let refresh_secret = require_secret(vars, "JWT_REFRESH_SECRET", &mut problems);

        let access_ttl = parse_ttl(vars, "JWT_EXPIRES_IN", DEFAULT_ACCESS_TTL)?;
        let refresh_ttl = parse_ttl(vars, "JWT_REFRESH_EXPIRES_IN", DEFAULT_REFRESH_TTL)?;

        if !problems.is_empty() {
            return Err(ConfigError::Invalid { problems });
        }

        Ok(Self {
            host,
            port,
            data_dir,
            environment,
            jwt: JwtConfig {
                secret,
                refresh_secret,
                access_ttl,
                refresh_ttl,
            },
            providers: ProviderConfig {
                gemini_api_key: vars.get("GEMINI_API_KEY").cloned().filter(|k| !k.is_empty()),
                openai_api_key: vars.get("OPENAI_API_KEY").cloned().filter(|k| !k.is_empty()),
            },
        })
    }
}

fn require_secret(
    vars: &HashMap<String, String>,
    name: &str,
    problems: &mut Vec<String>,
) -> String {
    match vars.get(name) {
        None => {
            problems.push(format!("{name} is required"));
            String::new()
        }
        Some(value) if value.len() < MIN_SECRET_LEN => {
            problems.push(format!(
                "{name} should have at least {MIN_SECRET_LEN} characters"
            ));
            String::new()
        }
        Some(value) => value.clone(),
    }
}

fn parse_ttl(
    vars: &HashMap<String, String>,
    name: &str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let raw = vars.get(name).map(String::as_str).unwrap_or(default);
    parse_duration(raw).ok_or_else(|| ConfigError::BadDuration {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Parse `30s` / `15m` / `12h` / `7d` shorthand into a duration. A bare
/// number is taken as seconds.
fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (value, unit) = match raw.chars().last() {
        Some(c) if c.is_ascii_digit() => (raw, "s"),
        Some('s') => (&raw[..raw.len() - 1], "s"),
        Some('m') => (&raw[..raw.len() - 1], "m"),
        Some('h') => (&raw[..raw.len() - 1], "h"),
        Some('d') => (&raw[..raw.len() - 1], "d"),
        _ => return None,
    };
    let value: u64 = value.parse().ok()?;
    let seconds = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 3600,
        "d" => value * 86_400,
        _ => unreachable!(),
    };
    Some(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            ("JWT_SECRET".to_string(), "0123456789abcdef".to_string()),
            (
                "JWT_REFRESH_SECRET".to_string(),
                "fedcba9876543210".to_string(),
            ),
        ])
    }

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let cfg = AppConfig::from_vars(&base_vars()).unwrap();
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.jwt.access_ttl, Duration::from_secs(15 * 60));
        assert_eq!(cfg.jwt.refresh_ttl, Duration::from_secs(7 * 86_400));
        assert!(cfg.providers.gemini_api_key.is_none());
    }

    #[test]
    fn all_problems_are_reported_together() {
        let vars = HashMap::from([
            ("JWT_SECRET".to_string(), "short".to_string()),
            ("EDITCHAIN_PORT".to_string(), "notaport".to_string()),
        ]);
        let err = AppConfig::from_vars(&vars).unwrap_err();
        match err {
            ConfigError::Invalid { problems } => {
                assert_eq!(problems.len(), 3); // short secret, missing refresh secret, bad port
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn duration_shorthand_parses() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_duration("90"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn bad_ttl_is_its_own_error() {
        let mut vars = base_vars();
        vars.insert("JWT_EXPIRES_IN".to_string(), "whenever".to_string());
        let err = AppConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::BadDuration { .. }));
    }
}
