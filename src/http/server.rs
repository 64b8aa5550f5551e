// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::observability::messages::http::{ConnectionFailed, ServerStarted};

use super::router::dispatch;
use super::state::AppState;

/// Accept loop. Each connection gets its own task; request routing is
/// handled by [`dispatch`].
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "{}",
        ServerStarted {
            addr: &addr.to_string(),
            environment: state.environment.as_str(),
        }
    );

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state = state.clone();
        tokio::task::spawn(async move {
            let service = service_fn(move |request| {
                let state = state.clone();
                async move { Ok::<_, Infallible>(dispatch(state, request).await) }
            });
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::error!("{}", ConnectionFailed { error: &err });
            }
        });
    }
}
