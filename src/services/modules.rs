// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, RepoError};
use crate::generators::{GenerationRequest, GeneratorRegistry};
use crate::models::{
    Module, ModuleCapability, ModuleCategory, ModuleModelConfig, ModulePreview, NewModule, UserRole,
};
use crate::repositories::{ListResult, ModuleFilter, ModuleRepository, ModuleSort, Page};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedResult {
    pub image: String,
    pub model: String,
}

/// Module catalog: listing, creation, seeding and preview generation.
pub struct ModuleService {
    modules: ModuleRepository,
    registry: Arc<GeneratorRegistry>,
}

impl ModuleService {
    pub fn new(modules: ModuleRepository, registry: Arc<GeneratorRegistry>) -> Self {
        Self { modules, registry }
    }

    pub async fn list(
        &self,
        filter: &ModuleFilter,
        sort: ModuleSort,
        page: Page,
    ) -> Result<ListResult<ModulePreview>, ApiError> {
        let result = self.modules.list(filter, sort, page).await?;
        Ok(result.map(|m| ModulePreview::from(&m)))
    }

    /// Register a new catalog module. Restricted to admins and editors.
    pub async fn create(&self, role: UserRole, input: NewModule) -> Result<Module, ApiError> {
        if !matches!(role, UserRole::Admin | UserRole::Editor) {
            return Err(ApiError::Forbidden(
                "Insufficient permissions to create modules".to_string(),
            ));
        }
        validate_module(&input)?;
        Ok(self.modules.create(input).await?)
    }

    /// Replace the mutable fields of an existing module. Restricted to
    /// admins and editors; the stored id and creation time survive.
    pub async fn update(
        &self,
        role: UserRole,
        module_id: &str,
        input: NewModule,
    ) -> Result<Module, ApiError> {
        if !matches!(role, UserRole::Admin | UserRole::Editor) {
            return Err(ApiError::Forbidden(
                "Insufficient permissions to update modules".to_string(),
            ));
        }
        validate_module(&input)?;
        Ok(self.modules.update(module_id, input).await?)
    }

    /// Ask an image-generation provider for a preview of what a prompt
    /// produces. Provider selection follows the requested model name.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GeneratedResult, ApiError> {
        if request.prompt.trim().is_empty() {
            return Err(ApiError::Validation("Prompt is required".to_string()));
        }
        let generator = self.registry.for_model(request.model.as_deref())?;
        let image = generator
            .generate(&GenerationRequest {
                prompt: request.prompt,
                ..GenerationRequest::default()
            })
            .await?;
        Ok(GeneratedResult {
            image: image.data_url,
            model: image.model,
        })
    }

    /// Insert the sample catalog entries that ship with the service.
    /// Existing entries are never overwritten.
    pub async fn seed(&self) -> Result<(), ApiError> {
        for input in sample_modules() {
            match self.modules.create(input).await {
                Ok(_) | Err(RepoError::Duplicate { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

fn validate_module(input: &NewModule) -> Result<(), ApiError> {
    let required = [
        ("moduleId", &input.module_id),
        ("name", &input.name),
        ("version", &input.version),
        ("description", &input.description),
        ("provider", &input.provider),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    if !(0.0..=5.0).contains(&input.rating) {
        return Err(ApiError::Validation("rating must be between 0 and 5".to_string()));
    }
    Ok(())
}

fn sample_modules() -> Vec<NewModule> {
    vec![
        NewModule {
            module_id: "line-colorizer".to_string(),
            name: "Line Art Colorizer".to_string(),
            version: "1.0.0".to_string(),
            description: "Detects line art and applies intelligent coloring in several styles.".to_string(),
            category: ModuleCategory::Repair,
            enabled: true,
            tags: vec!["line-art".to_string(), "colorize".to_string(), "sketch".to_string()],
            capabilities: vec![
                ModuleCapability {
                    name: "auto-palette".to_string(),
                    description: "Derives a palette from the line art".to_string(),
                },
                ModuleCapability {
                    name: "style-transfer".to_string(),
                    description: "Supports multiple style templates".to_string(),
                },
            ],
            parameters: Vec::new(),
            models: vec![
                ModuleModelConfig {
                    model: "gemini-2.5-flash-image".to_string(),
                    default: true,
                },
            ],
            visibility: vec![UserRole::Admin, UserRole::Editor, UserRole::User],
            provider: "editchain studio".to_string(),
            cost_tier: crate::models::CostTier::Standard,
            rating: 4.7,
            usage_count: 12_452,
        },
        NewModule {
            module_id: "portrait-cleaner".to_string(),
            name: "Portrait Cleaner".to_string(),
            version: "1.1.0".to_string(),
            description: "Removes people or objects from an image and repairs the background.".to_string(),
            category: ModuleCategory::Repair,
            enabled: true,
            tags: vec!["cleanup".to_string(), "object-removal".to_string()],
            capabilities: vec![
                ModuleCapability {
                    name: "mask-generation".to_string(),
                    description: "Detects the target region automatically".to_string(),
                },
                ModuleCapability {
                    name: "background-inpaint".to_string(),
                    description: "Reconstructs the removed region".to_string(),
                },
            ],
            parameters: Vec::new(),
            models: vec![
                ModuleModelConfig {
                    model: "gemini-2.5-flash-image".to_string(),
                    default: true,
                },
            ],
            visibility: vec![UserRole::Admin, UserRole::Editor],
            provider: "editchain studio".to_string(),
            cost_tier: crate::models::CostTier::Premium,
            rating: 4.5,
            usage_count: 8_230,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::store::JsonStore;

    fn service() -> (tempfile::TempDir, ModuleService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()));
        let registry = Arc::new(GeneratorRegistry::new(ProviderConfig::default()));
        (dir, ModuleService::new(ModuleRepository::new(store), registry))
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let (_dir, svc) = service();
        svc.seed().await.unwrap();
        svc.seed().await.unwrap();
        let listed = svc
            .list(&ModuleFilter::default(), ModuleSort::Recent, Page::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 2);
    }

    #[tokio::test]
    async fn list_returns_previews_not_full_documents() {
        let (_dir, svc) = service();
        svc.seed().await.unwrap();
        let listed = svc
            .list(&ModuleFilter::default(), ModuleSort::Rating, Page::default())
            .await
            .unwrap();
        assert_eq!(listed.items[0].module_id, "line-colorizer");
        let json = serde_json::to_value(&listed.items[0]).unwrap();
        assert!(json.get("capabilities").is_none());
    }

    #[tokio::test]
    async fn create_requires_an_elevated_role() {
        let (_dir, svc) = service();
        let input = sample_modules().remove(0);
        let err = svc.create(UserRole::User, input.clone()).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(svc.create(UserRole::Editor, input).await.is_ok());
    }

    #[tokio::test]
    async fn create_validates_required_fields() {
        let (_dir, svc) = service();
        let mut input = sample_modules().remove(0);
        input.name = "  ".to_string();
        assert!(matches!(
            svc.create(UserRole::Admin, input).await.unwrap_err(),
            ApiError::Validation(msg) if msg.contains("name")
        ));

        let mut input = sample_modules().remove(0);
        input.rating = 7.5;
        assert!(matches!(
            svc.create(UserRole::Admin, input).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn generate_rejects_blank_prompts() {
        let (_dir, svc) = service();
        let err = svc
            .generate(GenerateRequest {
                prompt: "   ".to_string(),
                model: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg == "Prompt is required"));
    }
}
