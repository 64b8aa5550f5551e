// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod api;
mod auth;
mod chain;
mod config;
mod generator;
mod repo;
mod store;

pub use api::ApiError;
pub use auth::AuthError;
pub use chain::ChainError;
pub use config::ConfigError;
pub use generator::GeneratorError;
pub use repo::RepoError;
pub use store::StoreError;
