// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Lifecycle of a single step.
///
/// Normal flow is `Pending → Processing → {Success | Error}`. Two manual
/// transitions exist on top of that: re-running a finished step resets it
/// through `Pending`, and skipping forces any non-running step to `Success`
/// without executing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Success,
    Error,
}

impl StepStatus {
    /// Terminal states; the step will not change again without user action.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Success | StepStatus::Error)
    }
}

/// One edit operation bound into a project's chain.
///
/// A step references its module by id and display name only; the module
/// catalog owns the definition. `progress` is meaningful only while the step
/// is processing, and `processing_time` is derived as `ended_at - started_at`
/// in seconds once both are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub module_id: String,
    pub module_name: String,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
    pub status: StepStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Seconds spent processing, derived when the step reaches a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl Step {
    pub fn new(
        module_id: impl Into<String>,
        module_name: impl Into<String>,
        parameters: HashMap<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            module_id: module_id.into(),
            module_name: module_name.into(),
            parameters,
            status: StepStatus::Pending,
            progress: 0,
            error_message: None,
            started_at: None,
            ended_at: None,
            processing_time: None,
        }
    }

    /// A fresh copy of this step: same module and parameters, new id, all
    /// execution state cleared.
    pub fn duplicate(&self) -> Self {
        Step::new(self.module_id.clone(), self.module_name.clone(), self.parameters.clone())
    }

    /// Enter the processing state. Clears any state left over from a prior
    /// run so a re-executed step reads like a first execution.
    pub fn begin(&mut self) {
        self.status = StepStatus::Processing;
        self.progress = 0;
        self.error_message = None;
        self.started_at = Some(Utc::now());
        self.ended_at = None;
        self.processing_time = None;
    }

    pub fn complete_success(&mut self) {
        self.status = StepStatus::Success;
        self.progress = 100;
        self.finish();
    }

    pub fn complete_error(&mut self, message: impl Into<String>) {
        self.status = StepStatus::Error;
        self.progress = 100;
        self.error_message = Some(message.into());
        self.finish();
    }

    /// Force success without execution. The end time is synthetic; duration
    /// is derived only when a real start time exists.
    pub fn mark_skipped(&mut self) {
        self.status = StepStatus::Success;
        self.progress = 100;
        self.error_message = None;
        self.finish();
    }

    fn finish(&mut self) {
        let now = Utc::now();
        self.ended_at = Some(now);
        self.processing_time = self
            .started_at
            .map(|start| (now - start).num_milliseconds() as f64 / 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Step {
        Step::new("upscale", "Quality Boost", HashMap::new())
    }

    #[test]
    fn new_step_starts_pending() {
        let s = step();
        assert_eq!(s.status, StepStatus::Pending);
        assert_eq!(s.progress, 0);
        assert!(s.started_at.is_none());
        assert!(!s.status.is_terminal());
    }

    #[test]
    fn success_derives_non_negative_duration() {
        let mut s = step();
        s.begin();
        s.complete_success();
        assert_eq!(s.status, StepStatus::Success);
        assert_eq!(s.progress, 100);
        assert!(s.processing_time.is_some_and(|t| t >= 0.0));
    }

    #[test]
    fn error_records_message_and_duration() {
        let mut s = step();
        s.begin();
        s.complete_error("processing failed: API timeout");
        assert_eq!(s.status, StepStatus::Error);
        assert_eq!(s.progress, 100);
        assert_eq!(s.error_message.as_deref(), Some("processing failed: API timeout"));
        assert!(s.ended_at.is_some());
    }

    #[test]
    fn skip_without_start_has_no_duration() {
        let mut s = step();
        s.mark_skipped();
        assert_eq!(s.status, StepStatus::Success);
        assert_eq!(s.progress, 100);
        assert!(s.ended_at.is_some());
        assert!(s.processing_time.is_none());
    }

    #[test]
    fn duplicate_resets_execution_state() {
        let mut s = step();
        s.parameters.insert("prompt".into(), Value::String("brighter".into()));
        s.begin();
        s.complete_error("boom");

        let copy = s.duplicate();
        assert_ne!(copy.id, s.id);
        assert_eq!(copy.module_id, s.module_id);
        assert_eq!(copy.parameters, s.parameters);
        assert_eq!(copy.status, StepStatus::Pending);
        assert_eq!(copy.progress, 0);
        assert!(copy.error_message.is_none());
        assert!(copy.started_at.is_none() && copy.ended_at.is_none());
    }

    #[test]
    fn rerun_clears_prior_outcome() {
        let mut s = step();
        s.begin();
        s.complete_error("boom");
        s.begin();
        assert_eq!(s.status, StepStatus::Processing);
        assert_eq!(s.progress, 0);
        assert!(s.error_message.is_none());
        assert!(s.ended_at.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let s = step();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("moduleId").is_some());
        assert!(json.get("moduleName").is_some());
        assert_eq!(json["status"], "pending");
        // Cleared optionals stay out of the wire form entirely.
        assert!(json.get("errorMessage").is_none());
    }
}
