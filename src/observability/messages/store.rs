// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for persistence and seeding events.

use std::fmt::{Display, Formatter};

/// The sample catalog and prompt library were planted.
///
/// Logged at `info!` once during startup.
pub struct SeedCompleted<'a> {
    pub data_dir: &'a str,
}

impl Display for SeedCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Seeded sample data under {}", self.data_dir)
    }
}

/// A collection file failed its health probe.
///
/// Logged at `error!`.
pub struct StorageUnavailable<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for StorageUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Storage verification failed: {}", self.error)
    }
}
