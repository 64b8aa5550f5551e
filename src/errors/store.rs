// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for the JSON file store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the on-disk JSON collections.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not parse as the expected JSON array.
    #[error("corrupt collection file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized for persistence.
    #[error("failed to encode collection {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
