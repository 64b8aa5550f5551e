// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use crate::errors::ChainError;
use crate::observability::messages::chain::{ChainCompleted, StepFinished, StepStarted};
use crate::traits::{ProgressSink, StepRunner};

use super::module::EditModule;
use super::progress::StepProgress;
use super::project::{Project, ProjectStatus};
use super::step::{Step, StepStatus};

/// Progress advances in increments of this many percent, with a yield point
/// between increments so other tasks can interleave.
const PROGRESS_INCREMENT: u8 = 10;

/// The application context for chain editing: all open projects, the active
/// one, and the injected execution seams.
///
/// Every mutation goes through a method here; callers never reach into a
/// project directly. Execution is strictly sequential - `execute_all` drives
/// one step at a time and holds the workspace for the duration, so progress
/// updates for a step never interleave with other mutations.
pub struct Workspace {
    projects: Vec<Project>,
    active_id: Option<String>,
    runner: Arc<dyn StepRunner>,
    sink: Arc<dyn ProgressSink>,
}

impl Workspace {
    pub fn new(runner: Arc<dyn StepRunner>, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            projects: Vec::new(),
            active_id: None,
            runner,
            sink,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active_project(&self) -> Option<&Project> {
        let id = self.active_id.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    /// Create a new draft project and make it the active one.
    pub fn create_project(&mut self, name: impl Into<String>) -> &Project {
        let project = Project::new(name);
        self.active_id = Some(project.id.clone());
        let index = self.projects.len();
        self.projects.push(project);
        &self.projects[index]
    }

    pub fn select_project(&mut self, project_id: &str) -> Result<(), ChainError> {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(ChainError::ProjectNotFound(project_id.to_string()));
        }
        self.active_id = Some(project_id.to_string());
        Ok(())
    }

    pub fn remove_project(&mut self, project_id: &str) -> Result<(), ChainError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| ChainError::ProjectNotFound(project_id.to_string()))?;
        self.projects.remove(index);
        if self.active_id.as_deref() == Some(project_id) {
            self.active_id = None;
        }
        Ok(())
    }

    /// Attach a source image to the active project, creating an untitled
    /// project first when none is active. Replacing the source always clears
    /// the previous result.
    pub fn upload_image(&mut self, data_url: &str) -> Result<&Project, ChainError> {
        validate_data_url(data_url)?;
        if self.active_id.is_none() {
            self.create_project("Untitled project");
        }
        let index = self.active_index()?;
        let project = &mut self.projects[index];
        project.original_image = Some(data_url.to_string());
        project.result_image = None;
        project.status = ProjectStatus::Draft;
        project.touch();
        Ok(&self.projects[index])
    }

    /// Replace or clear the active project's result outside step execution.
    pub fn set_result_image(&mut self, image: Option<String>) -> Result<(), ChainError> {
        let index = self.active_index()?;
        let project = &mut self.projects[index];
        project.result_image = image;
        project.touch();
        Ok(())
    }

    /// Append a step for the given module to the active project's chain.
    /// When the caller supplies no prompt, the module's template is used.
    pub fn add_step(
        &mut self,
        module: &EditModule,
        mut parameters: HashMap<String, Value>,
    ) -> Result<&Step, ChainError> {
        let index = self.active_index()?;
        parameters
            .entry("prompt".to_string())
            .or_insert_with(|| Value::String(module.prompt_template.clone()));
        let project = &mut self.projects[index];
        let si = project.steps.len();
        project.steps.push(Step::new(&module.id, &module.name, parameters));
        project.touch();
        Ok(&self.projects[index].steps[si])
    }

    pub fn remove_step(&mut self, step_id: &str) -> Result<(), ChainError> {
        let (pi, si) = self.locate_step(step_id)?;
        self.projects[pi].steps.remove(si);
        self.projects[pi].touch();
        Ok(())
    }

    /// Insert a reset copy of a step immediately after the original,
    /// returning the new step's id.
    pub fn duplicate_step(&mut self, step_id: &str) -> Result<String, ChainError> {
        let (pi, si) = self.locate_step(step_id)?;
        let copy = self.projects[pi].steps[si].duplicate();
        let id = copy.id.clone();
        self.projects[pi].steps.insert(si + 1, copy);
        self.projects[pi].touch();
        Ok(id)
    }

    /// Force a step to success without executing it.
    pub fn skip_step(&mut self, step_id: &str) -> Result<(), ChainError> {
        let (pi, si) = self.locate_step(step_id)?;
        self.projects[pi].steps[si].mark_skipped();
        self.projects[pi].touch();
        self.publish(pi, si);
        Ok(())
    }

    /// Move the step at `from` so it ends up at `to`. Both indices are
    /// positions in the current sequence.
    pub fn reorder_steps(&mut self, from: usize, to: usize) -> Result<(), ChainError> {
        let pi = self.active_index()?;
        let len = self.projects[pi].steps.len();
        if from >= len {
            return Err(ChainError::ReorderOutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(ChainError::ReorderOutOfBounds { index: to, len });
        }
        let step = self.projects[pi].steps.remove(from);
        self.projects[pi].steps.insert(to, step);
        self.projects[pi].touch();
        Ok(())
    }

    /// Drive one step through its lifecycle. The runner decides the outcome;
    /// a runner failure becomes the step's recorded error, not an `Err` here.
    pub async fn execute_step(&mut self, step_id: &str) -> Result<(), ChainError> {
        let (pi, si) = self.locate_step(step_id)?;

        let snapshot = {
            let step = &mut self.projects[pi].steps[si];
            step.begin();
            step.clone()
        };
        tracing::info!(
            "{}",
            StepStarted {
                step_id: &snapshot.id,
                module_id: &snapshot.module_id,
            }
        );
        self.projects[pi].touch();
        self.publish(pi, si);

        let mut percent = PROGRESS_INCREMENT;
        while percent < 100 {
            tokio::task::yield_now().await;
            self.projects[pi].steps[si].progress = percent;
            self.publish(pi, si);
            percent += PROGRESS_INCREMENT;
        }

        let source = self.projects[pi].working_image().map(str::to_string);
        let outcome = self.runner.run(&snapshot, source.as_deref()).await;

        let project = &mut self.projects[pi];
        match outcome {
            Ok(image) => {
                project.steps[si].complete_success();
                project.result_image = Some(image);
            }
            Err(err) => {
                project.steps[si].complete_error(err.0);
                project.result_image = None;
            }
        }
        project.touch();

        let step = &project.steps[si];
        let finished = StepFinished {
            step_id: &step.id,
            outcome: if step.status == StepStatus::Success { "success" } else { "error" },
            seconds: step.processing_time.unwrap_or(0.0),
        };
        if step.status == StepStatus::Success {
            tracing::info!("{finished}");
        } else {
            tracing::warn!("{finished}");
        }
        self.publish(pi, si);
        Ok(())
    }

    /// Execute every step of the active project in order, skipping steps
    /// already in success state. Step failures are recorded and the walk
    /// continues; the project ends `Completed` regardless of outcomes.
    pub async fn execute_all(&mut self) -> Result<(), ChainError> {
        let pi = self.active_index()?;
        self.projects[pi].status = ProjectStatus::Processing;
        self.projects[pi].touch();

        let pending: Vec<String> = self.projects[pi]
            .steps
            .iter()
            .filter(|s| s.status != StepStatus::Success)
            .map(|s| s.id.clone())
            .collect();
        for id in pending {
            self.execute_step(&id).await?;
        }

        let pi = self.active_index()?;
        self.projects[pi].status = ProjectStatus::Completed;
        self.projects[pi].touch();
        tracing::info!(
            "{}",
            ChainCompleted {
                project_id: &self.projects[pi].id,
                steps: self.projects[pi].steps.len(),
            }
        );
        Ok(())
    }

    fn active_index(&self) -> Result<usize, ChainError> {
        let id = self.active_id.as_deref().ok_or(ChainError::NoActiveProject)?;
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(ChainError::NoActiveProject)
    }

    fn locate_step(&self, step_id: &str) -> Result<(usize, usize), ChainError> {
        let pi = self.active_index()?;
        let si = self.projects[pi]
            .step_index(step_id)
            .ok_or_else(|| ChainError::StepNotFound(step_id.to_string()))?;
        Ok((pi, si))
    }

    fn publish(&self, pi: usize, si: usize) {
        let step = &self.projects[pi].steps[si];
        self.sink
            .on_progress(&StepProgress::new(step.id.clone(), step.status, step.progress));
    }
}

/// Uploaded images arrive as base64 data URLs. The payload is decoded in full
/// so a truncated or corrupted upload is rejected before it reaches a chain.
fn validate_data_url(data_url: &str) -> Result<(), ChainError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| ChainError::InvalidImage("expected a data: URL".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ChainError::InvalidImage("expected base64-encoded payload".to_string()))?;
    if !mime.starts_with("image/") {
        return Err(ChainError::InvalidImage(format!("unsupported media type '{mime}'")));
    }
    if payload.is_empty() {
        return Err(ChainError::InvalidImage("empty payload".to_string()));
    }
    BASE64
        .decode(payload)
        .map_err(|e| ChainError::InvalidImage(e.to_string()))?;
    Ok(())
}
