// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod env;

pub mod consts;

pub use env::{AppConfig, Environment, JwtConfig, ProviderConfig};
