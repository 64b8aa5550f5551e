// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! DALL-E 3 provider via the OpenAI images endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{classify_status, GeneratedImage, GenerationRequest, ImageGenerator};
use crate::errors::GeneratorError;

const PROVIDER: &str = "DALL-E 3";
const MODEL: &str = "dall-e-3";
const ENDPOINT: &str = "https://api.openai.com/v1/images/generations";

pub struct Dalle3Generator {
    client: reqwest::Client,
    api_key: String,
}

impl Dalle3Generator {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

#[async_trait]
impl ImageGenerator for Dalle3Generator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, GeneratorError> {
        let body = json!({
            "model": MODEL,
            "prompt": request.prompt,
            "n": 1,
            "size": request.size.as_deref().unwrap_or("1024x1024"),
            "quality": request.quality.as_deref().unwrap_or("standard"),
            "style": request.style.as_deref().unwrap_or("vivid"),
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
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

        let parsed: ImagesResponse = response
            .json()
            .await
            .map_err(|source| GeneratorError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let b64 = parsed
            .data
            .into_iter()
            .filter_map(|d| d.b64_json)
            .next()
            .ok_or(GeneratorError::NoImageData(PROVIDER))?;

        Ok(GeneratedImage {
            data_url: format!("data:image/png;base64,{b64}"),
            model: MODEL.to_string(),
        })
    }

    fn model_name(&self) -> &'static str {
        MODEL
    }
}
