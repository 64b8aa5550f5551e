// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::generators::{GenerationRequest, GeneratorRegistry};
use crate::traits::{RunnerError, StepRunner};

use super::step::Step;

/// Production step runner: resolves the step's requested model to a
/// configured provider and asks it for the edited image.
///
/// The prompt comes from the step's `prompt` parameter, the provider from its
/// `model` parameter (falling back to the default provider when absent).
pub struct GenerationRunner {
    registry: Arc<GeneratorRegistry>,
}

impl GenerationRunner {
    pub fn new(registry: Arc<GeneratorRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl StepRunner for GenerationRunner {
    async fn run(&self, step: &Step, _source_image: Option<&str>) -> Result<String, RunnerError> {
        let prompt = step
            .parameters
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| RunnerError(format!("step '{}' has no prompt", step.module_name)))?;
        let model = step.parameters.get("model").and_then(Value::as_str);

        let generator = self
            .registry
            .for_model(model)
            .map_err(|e| RunnerError(e.to_string()))?;

        let request = GenerationRequest {
            prompt: prompt.to_string(),
            ..GenerationRequest::default()
        };
        let image = generator
            .generate(&request)
            .await
            .map_err(|e| RunnerError(e.to_string()))?;
        Ok(image.data_url)
    }
}
