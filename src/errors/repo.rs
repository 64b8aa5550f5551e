// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::StoreError;

/// Errors from repository operations over the JSON collections.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record with the same business identifier already exists.
    #[error("{entity} '{id}' already exists")]
    Duplicate { entity: &'static str, id: String },

    /// The record addressed by business identifier does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
}
