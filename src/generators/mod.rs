// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! External image-generation providers.
//!
//! Model selection happens exactly once: a display name such as
//! `"Gemini 2.5 Flash Image"` or `"DALL·E 3"` resolves to a [`GeneratorKind`]
//! at request time, and everything downstream dispatches on the enum. Call
//! sites never match on strings.

mod dalle;
mod gemini;

pub use dalle::Dalle3Generator;
pub use gemini::GeminiGenerator;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::errors::GeneratorError;

/// Options for one generation call. Only `prompt` is required; providers
/// apply their own defaults for the rest.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub size: Option<String>,
    pub quality: Option<String>,
    pub style: Option<String>,
}

/// A produced image as a base64 `data:` URL plus the model that made it.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data_url: String,
    pub model: String,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, GeneratorError>;

    fn model_name(&self) -> &'static str;
}

/// The providers this build knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Gemini,
    Dalle3,
}

impl GeneratorKind {
    /// Resolve a human-facing model name to a provider. Recognition is
    /// intentionally loose about punctuation and spacing ("DALL·E 3",
    /// "dall-e-3", "DALLE3" all resolve), but an unrecognized name is an
    /// error, not a fallback.
    pub fn resolve(model_name: &str) -> Result<Self, GeneratorError> {
        let normalized: String = model_name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect();

        if normalized.contains("gemini") {
            return Ok(GeneratorKind::Gemini);
        }
        if normalized.contains("dalle") {
            return Ok(GeneratorKind::Dalle3);
        }
        Err(GeneratorError::UnsupportedModel(model_name.to_string()))
    }
}

/// Constructs generators from configured provider credentials.
pub struct GeneratorRegistry {
    providers: ProviderConfig,
    client: reqwest::Client,
}

impl GeneratorRegistry {
    pub fn new(providers: ProviderConfig) -> Self {
        Self {
            providers,
            client: reqwest::Client::new(),
        }
    }

    /// Build the generator for a model name, or for the default provider
    /// (Gemini) when no name is given. Fails when the provider's API key is
    /// not configured.
    pub fn for_model(&self, model_name: Option<&str>) -> Result<Box<dyn ImageGenerator>, GeneratorError> {
        let kind = match model_name {
            Some(name) if !name.trim().is_empty() => GeneratorKind::resolve(name)?,
            _ => GeneratorKind::Gemini,
        };
        match kind {
            GeneratorKind::Gemini => {
                let key = self
                    .providers
                    .gemini_api_key
                    .clone()
                    .ok_or(GeneratorError::MissingApiKey("Gemini"))?;
                Ok(Box::new(GeminiGenerator::new(self.client.clone(), key)))
            }
            GeneratorKind::Dalle3 => {
                let key = self
                    .providers
                    .openai_api_key
                    .clone()
                    .ok_or(GeneratorError::MissingApiKey("DALL-E 3"))?;
                Ok(Box::new(Dalle3Generator::new(self.client.clone(), key)))
            }
        }
    }
}

/// Shared mapping of upstream HTTP status codes onto user-readable guidance.
fn classify_status(provider: &'static str, status: reqwest::StatusCode) -> Option<GeneratorError> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Some(GeneratorError::QuotaExceeded(provider));
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Some(GeneratorError::UpstreamAuth(provider));
    }
    if !status.is_success() {
        return Some(GeneratorError::UnexpectedResponse {
            provider,
            detail: format!("HTTP {status}"),
        });
    }
    None
}
