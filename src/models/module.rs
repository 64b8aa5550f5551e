use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Repair,
    Enhancement,
    Style,
    Creative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Free,
    Standard,
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCapability {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    Select,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterOption {
    pub value: String,
    pub label: String,
}

/// Declared input of a module, rendered as a form field by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleParameter {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ParameterOption>>,
}

/// A backing model a module can run on. Exactly one entry should be the
/// default; the repository does not enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleModelConfig {
    pub model: String,
    #[serde(default)]
    pub default: bool,
}

/// A catalog entry describing one AI-backed image transformation, as stored
/// in `modules.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub module_id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub category: ModuleCategory,
    pub enabled: bool,
    pub tags: Vec<String>,
    pub capabilities: Vec<ModuleCapability>,
    pub parameters: Vec<ModuleParameter>,
    pub models: Vec<ModuleModelConfig>,
    pub visibility: Vec<UserRole>,
    pub provider: String,
    pub cost_tier: CostTier,
    pub rating: f64,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Module definition as supplied by create/seed callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModule {
    pub module_id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub category: ModuleCategory,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<ModuleCapability>,
    #[serde(default)]
    pub parameters: Vec<ModuleParameter>,
    #[serde(default)]
    pub models: Vec<ModuleModelConfig>,
    #[serde(default = "default_visibility")]
    pub visibility: Vec<UserRole>,
    pub provider: String,
    #[serde(default = "default_cost_tier")]
    pub cost_tier: CostTier,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub usage_count: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_visibility() -> Vec<UserRole> {
    vec![UserRole::Admin, UserRole::Editor, UserRole::User]
}

fn default_cost_tier() -> CostTier {
    CostTier::Standard
}

impl Module {
    pub fn new(input: NewModule) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            module_id: input.module_id,
            name: input.name,
            version: input.version,
            description: input.description,
            category: input.category,
            enabled: input.enabled,
            tags: input.tags,
            capabilities: input.capabilities,
            parameters: input.parameters,
            models: input.models,
            visibility: input.visibility,
            provider: input.provider,
            cost_tier: input.cost_tier,
            rating: input.rating,
            usage_count: input.usage_count,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lightweight projection for catalog listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePreview {
    pub module_id: String,
    pub name: String,
    pub description: String,
    pub category: ModuleCategory,
    pub tags: Vec<String>,
    pub rating: f64,
    pub cost_tier: CostTier,
    pub provider: String,
    pub enabled: bool,
}

impl From<&Module> for ModulePreview {
    fn from(module: &Module) -> Self {
        Self {
            module_id: module.module_id.clone(),
            name: module.name.clone(),
            description: module.description.clone(),
            category: module.category,
            tags: module.tags.clone(),
            rating: module.rating,
            cost_tier: module.cost_tier,
            provider: module.provider.clone(),
            enabled: module.enabled,
        }
    }
}
