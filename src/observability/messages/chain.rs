// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for step execution lifecycle events.

use std::fmt::{Display, Formatter};

/// A step entered the processing state.
///
/// Logged at `info!`.
pub struct StepStarted<'a> {
    pub step_id: &'a str,
    pub module_id: &'a str,
}

impl Display for StepStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executing step {} (module {})", self.step_id, self.module_id)
    }
}

/// A step reached a terminal state.
///
/// Logged at `info!` on success and `warn!` on error.
pub struct StepFinished<'a> {
    pub step_id: &'a str,
    pub outcome: &'a str,
    pub seconds: f64,
}

impl Display for StepFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} finished with {} after {:.2}s",
            self.step_id, self.outcome, self.seconds
        )
    }
}

/// A full chain walk completed.
///
/// Logged at `info!`.
pub struct ChainCompleted<'a> {
    pub project_id: &'a str,
    pub steps: usize,
}

impl Display for ChainCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Chain for project {} completed ({} steps)", self.project_id, self.steps)
    }
}
