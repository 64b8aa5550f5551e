// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Input validation and orchestration between the REST surface and the
//! repositories. Services own all business rules; handlers only translate
//! HTTP to service calls and back.

mod auth;
mod modules;
mod prompts;

pub use auth::{AuthResponse, AuthService, AuthTokens, LoginRequest, RegisterRequest};
pub use modules::{GenerateRequest, GeneratedResult, ModuleService};
pub use prompts::{PromptService, PromptUsage};
