// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use super::step::StepStatus;

/// A point-in-time progress report for one step, published to the
/// [`ProgressSink`](crate::traits::ProgressSink) between yield points.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub step_id: String,
    pub status: StepStatus,
    /// Percent complete, 0 through 100.
    pub percentage: u8,
}

impl StepProgress {
    pub fn new(step_id: impl Into<String>, status: StepStatus, percentage: u8) -> Self {
        Self {
            step_id: step_id.into(),
            status,
            percentage: percentage.min(100),
        }
    }
}
