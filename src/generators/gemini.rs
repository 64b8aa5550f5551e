// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Gemini 2.5 Flash Image Preview provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{classify_status, GeneratedImage, GenerationRequest, ImageGenerator};
use crate::errors::GeneratorError;

const PROVIDER: &str = "Gemini";
const MODEL: &str = "gemini-2.5-flash-image-preview";
const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, GeneratorError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }]
        });

        let response = self
            .client
            .post(ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|source| GeneratorError::Transport {
                provider: PROVIDER,
                source,
            })?;

        if let Some(err) = classify_status(PROVIDER, response.status()) {
            return Err(err);
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|source| GeneratorError::Transport {
                    provider: PROVIDER,
                    source,
                })?;

        let image = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.inline_data)
            .find(|data| data.mime_type.starts_with("image/"))
            .ok_or(GeneratorError::NoImageData(PROVIDER))?;

        Ok(GeneratedImage {
            data_url: format!("data:{};base64,{}", image.mime_type, image.data),
            model: MODEL.to_string(),
        })
    }

    fn model_name(&self) -> &'static str {
        MODEL
    }
}
