// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::config::{AppConfig, Environment};
use crate::generators::GeneratorRegistry;
use crate::repositories::{ModuleRepository, PromptRepository, UserRepository};
use crate::services::{AuthService, ModuleService, PromptService};
use crate::store::JsonStore;

/// Everything the handlers need, shared across connections.
pub struct AppState {
    pub auth: AuthService,
    pub modules: ModuleService,
    pub prompts: PromptService,
    pub store: Arc<JsonStore>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(JsonStore::new(&config.data_dir));
        let registry = Arc::new(GeneratorRegistry::new(config.providers.clone()));
        Self {
            auth: AuthService::new(
                UserRepository::new(store.clone()),
                TokenSigner::new(config.jwt.clone()),
            ),
            modules: ModuleService::new(ModuleRepository::new(store.clone()), registry),
            prompts: PromptService::new(PromptRepository::new(store.clone())),
            environment: config.environment,
            store,
        }
    }

    /// Plant the sample catalog and prompt library. Safe to call on every
    /// startup; existing records are left alone.
    pub async fn seed(&self) -> Result<(), crate::errors::ApiError> {
        self.modules.seed().await?;
        self.prompts.seed().await?;
        Ok(())
    }
}
