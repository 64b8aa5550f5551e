// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod auth;         // token signing + password hashing
pub mod chain;        // project/step execution engine
pub mod config;       // environment-backed configuration
pub mod errors;       // error handling
pub mod generators;   // image-generation providers
pub mod http;         // REST surface
pub mod models;       // persisted entities
pub mod observability;
pub mod repositories; // filter/sort/paginate over the store
pub mod services;     // validation + orchestration
pub mod store;        // JSON file persistence
pub mod traits;       // unified abstractions
