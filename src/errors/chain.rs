// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the chain execution engine.

use thiserror::Error;

/// Errors for workspace and step operations. Step execution failures are not
/// errors at this level; they are recorded on the step itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// An operation needed an active project and none is loaded.
    #[error("no active project")]
    NoActiveProject,

    /// The requested project does not exist in the workspace.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// The requested step does not exist in the current project.
    #[error("step '{0}' not found in current project")]
    StepNotFound(String),

    /// A reorder index fell outside the step sequence.
    #[error("reorder index out of bounds: {index} (steps: {len})")]
    ReorderOutOfBounds { index: usize, len: usize },

    /// An uploaded image is not a well-formed base64 data URL.
    #[error("invalid image payload: {0}")]
    InvalidImage(String),
}
