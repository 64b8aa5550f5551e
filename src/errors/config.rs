// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors produced while loading configuration from the environment.
///
/// `Invalid` aggregates every problem found in one pass so an operator can
/// fix the whole environment at once instead of replaying failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more environment variables are missing or malformed.
    Invalid { problems: Vec<String> },

    /// A duration shorthand such as `15m` or `7d` could not be parsed.
    BadDuration { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { problems } => {
                write!(f, "Invalid environment: {}", problems.join("; "))
            }
            ConfigError::BadDuration { name, value } => {
                write!(
                    f,
                    "{name} has unparseable duration '{value}' (expected forms: 30s, 15m, 12h, 7d)"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
