// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for request handling events.

use std::fmt::{Display, Formatter};

/// The listener is accepting connections.
///
/// Logged at `info!` once during startup.
pub struct ServerStarted<'a> {
    pub addr: &'a str,
    pub environment: &'a str,
}

impl Display for ServerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Listening on http://{} ({})", self.addr, self.environment)
    }
}

/// A request was answered.
///
/// Logged at `info!` for success statuses and `warn!` for error statuses.
pub struct RequestCompleted<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub status: u16,
}

impl Display for RequestCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.path, self.status)
    }
}

/// A connection could not be served at all.
///
/// Logged at `error!`.
pub struct ConnectionFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ConnectionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connection error: {}", self.error)
    }
}
