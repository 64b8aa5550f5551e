use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVisibility {
    Public,
    Private,
    System,
}

/// A reusable text template fed to an AI model, as stored in `prompts.json`.
/// `usage_count` and `success_rate` are maintained by usage tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub prompt_id: String,
    pub name: String,
    pub content: String,
    pub category: String,
    pub visibility: PromptVisibility,
    pub access_level: Vec<UserRole>,
    pub created_by: String,
    pub usage_count: u64,
    pub success_rate: f64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrompt {
    pub prompt_id: String,
    pub name: String,
    pub content: String,
    pub category: String,
    #[serde(default = "default_visibility")]
    pub visibility: PromptVisibility,
    pub access_level: Vec<UserRole>,
    pub created_by: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_visibility() -> PromptVisibility {
    PromptVisibility::Public
}

impl Prompt {
    /// New prompts start with zero usage and a zero success rate.
    pub fn new(input: NewPrompt) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            prompt_id: input.prompt_id,
            name: input.name,
            content: input.content,
            category: input.category,
            visibility: input.visibility,
            access_level: input.access_level,
            created_by: input.created_by,
            usage_count: 0,
            success_rate: 0.0,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lightweight projection for library listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPreview {
    pub prompt_id: String,
    pub name: String,
    pub category: String,
    pub visibility: PromptVisibility,
    pub access_level: Vec<UserRole>,
    pub usage_count: u64,
    pub success_rate: f64,
    pub tags: Vec<String>,
}

impl From<&Prompt> for PromptPreview {
    fn from(prompt: &Prompt) -> Self {
        Self {
            prompt_id: prompt.prompt_id.clone(),
            name: prompt.name.clone(),
            category: prompt.category.clone(),
            visibility: prompt.visibility,
            access_level: prompt.access_level.clone(),
            usage_count: prompt.usage_count,
            success_rate: prompt.success_rate,
            tags: prompt.tags.clone(),
        }
    }
}
