// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Persisted entities: users, catalog modules, prompt templates.
//!
//! All entities serialize with camelCase field names and ISO-8601 timestamp
//! strings, matching the on-disk JSON layout the repositories read and write.

mod module;
mod prompt;
mod user;

pub use module::{
    CostTier, Module, ModuleCapability, ModuleCategory, ModuleModelConfig, ModuleParameter,
    ModulePreview, NewModule, ParameterOption, ParameterType,
};
pub use prompt::{NewPrompt, Prompt, PromptPreview, PromptVisibility};
pub use user::{NewUser, User, UserProfile, UserRole};
