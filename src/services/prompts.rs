// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::errors::{ApiError, RepoError};
use crate::models::{NewPrompt, Prompt, PromptPreview, PromptVisibility, UserRole};
use crate::repositories::{ListResult, Page, PromptFilter, PromptRepository, PromptSort};

/// Acknowledgement returned after recording one prompt use.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptUsage {
    pub prompt_id: String,
    pub success: bool,
}

/// Prompt library: listing, creation, seeding and usage statistics.
pub struct PromptService {
    prompts: PromptRepository,
}

impl PromptService {
    pub fn new(prompts: PromptRepository) -> Self {
        Self { prompts }
    }

    pub async fn list(
        &self,
        filter: &PromptFilter,
        sort: PromptSort,
        page: Page,
    ) -> Result<ListResult<PromptPreview>, ApiError> {
        let result = self.prompts.list(filter, sort, page).await?;
        Ok(result.map(|p| PromptPreview::from(&p)))
    }

    /// Add a prompt to the library. Restricted to admins and editors; the
    /// caller's id becomes `created_by` when the payload leaves it blank.
    pub async fn create(
        &self,
        role: UserRole,
        caller_id: &str,
        mut input: NewPrompt,
    ) -> Result<Prompt, ApiError> {
        if !matches!(role, UserRole::Admin | UserRole::Editor) {
            return Err(ApiError::Forbidden(
                "Insufficient permissions to create prompts".to_string(),
            ));
        }
        if input.created_by.trim().is_empty() {
            input.created_by = caller_id.to_string();
        }
        validate_prompt(&input)?;
        Ok(self.prompts.create(input).await?)
    }

    /// Fold one outcome into the prompt's running success rate.
    pub async fn track_usage(&self, prompt_id: &str, success: bool) -> Result<PromptUsage, ApiError> {
        self.prompts.update_usage(prompt_id, success).await?;
        Ok(PromptUsage {
            prompt_id: prompt_id.to_string(),
            success,
        })
    }

    /// Insert the prompts that ship with the service, skipping ones already
    /// present.
    pub async fn seed(&self) -> Result<(), ApiError> {
        for input in seed_prompts() {
            match self.prompts.create(input).await {
                Ok(_) | Err(RepoError::Duplicate { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

fn validate_prompt(input: &NewPrompt) -> Result<(), ApiError> {
    let required = [
        ("promptId", &input.prompt_id),
        ("name", &input.name),
        ("content", &input.content),
        ("category", &input.category),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    if input.access_level.is_empty() {
        return Err(ApiError::Validation("accessLevel must not be empty".to_string()));
    }
    Ok(())
}

fn seed_prompts() -> Vec<NewPrompt> {
    let all_roles = vec![UserRole::Admin, UserRole::Editor, UserRole::User];
    vec![
        NewPrompt {
            prompt_id: "portrait-enhance-basic".to_string(),
            name: "Portrait Enhancement (Basic)".to_string(),
            content: "Please enhance the portrait with natural skin retouching, preserve facial \
                      details and deliver a high-resolution output."
                .to_string(),
            category: "portrait".to_string(),
            visibility: PromptVisibility::Public,
            access_level: all_roles.clone(),
            created_by: "system".to_string(),
            tags: vec!["portrait".to_string(), "enhancement".to_string(), "retouch".to_string()],
        },
        NewPrompt {
            prompt_id: "style-transfer-neo-noir".to_string(),
            name: "Neo-Noir Style Transfer".to_string(),
            content: "Transform the image into a neo-noir aesthetic with deep shadows, neon \
                      highlights, and cinematic color grading."
                .to_string(),
            category: "style".to_string(),
            visibility: PromptVisibility::System,
            access_level: vec![UserRole::Admin, UserRole::Editor],
            created_by: "system".to_string(),
            tags: vec!["style".to_string(), "noir".to_string(), "creative".to_string()],
        },
        NewPrompt {
            prompt_id: "background-cleanup".to_string(),
            name: "Background Cleanup".to_string(),
            content: "Isolate the main subject, remove background artifacts, and provide a \
                      transparent or clean background layer."
                .to_string(),
            category: "cleanup".to_string(),
            visibility: PromptVisibility::Public,
            access_level: all_roles,
            created_by: "system".to_string(),
            tags: vec!["cleanup".to_string(), "background".to_string(), "segmentation".to_string()],
        },
    ]
}
