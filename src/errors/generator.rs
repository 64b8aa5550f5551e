// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors from external image-generation providers.
//!
//! Quota and credential failures from upstream APIs are rewritten into
//! user-readable guidance here rather than leaking raw provider payloads.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The model name does not resolve to a configured provider.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// The provider requires an API key that is not configured.
    #[error("API key for {0} is not configured")]
    MissingApiKey(&'static str),

    /// Upstream rejected the request for quota reasons.
    #[error("{0} quota exceeded. Check your plan and billing details, or retry later with a smaller request.")]
    QuotaExceeded(&'static str),

    /// Upstream rejected the configured credentials.
    #[error("{0} rejected the configured API key. Verify the key is valid and has image generation access.")]
    UpstreamAuth(&'static str),

    /// Transport-level failure talking to the provider.
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered but returned no image payload.
    #[error("{0} did not return image data")]
    NoImageData(&'static str),

    /// The provider answered with a body this client cannot interpret.
    #[error("unexpected response from {provider}: {detail}")]
    UnexpectedResponse {
        provider: &'static str,
        detail: String,
    },
}
