// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use editchain::config::AppConfig;
use editchain::http::{serve, AppState};
use editchain::observability::messages::store::SeedCompleted;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("configuration is invalid")?;
    let state = Arc::new(AppState::new(&config));

    state
        .seed()
        .await
        .map_err(|err| anyhow::anyhow!("seeding sample data failed: {err}"))?;
    tracing::info!(
        "{}",
        SeedCompleted {
            data_dir: &config.data_dir.display().to_string(),
        }
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    serve(state, addr).await.context("server terminated")?;
    Ok(())
}
