// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use http::request::Parts;
use http::{Method, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::Request;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::errors::{ApiError, AuthError};
use crate::models::{NewModule, NewPrompt};
use crate::observability::messages::http::RequestCompleted;
use crate::services::{GenerateRequest, LoginRequest, RegisterRequest};

use super::envelope::{json_error, json_plain, json_success};
use super::query;
use super::state::AppState;

/// Entry point for one connection's requests: collect the body, route, and
/// log the outcome.
pub async fn dispatch(state: Arc<AppState>, request: Request<Incoming>) -> Response<Full<Bytes>> {
    let (parts, body) = request.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return json_error(&ApiError::Validation(format!("Unreadable request body: {err}")));
        }
    };

    let response = match route(&state, &parts, body).await {
        Ok(response) => response,
        Err(err) => json_error(&err),
    };

    let completed = RequestCompleted {
        method: parts.method.as_str(),
        path: parts.uri.path(),
        status: response.status().as_u16(),
    };
    if response.status().is_success() {
        tracing::info!("{completed}");
    } else {
        tracing::warn!("{completed}");
    }
    response
}

#[derive(Deserialize)]
struct RefreshBody {
    #[serde(rename = "refreshToken", default)]
    refresh_token: String,
}

#[derive(Deserialize, Default)]
struct UsageBody {
    #[serde(default)]
    success: bool,
}

pub(crate) async fn route(
    state: &AppState,
    parts: &Parts,
    body: Bytes,
) -> Result<Response<Full<Bytes>>, ApiError> {
    let path = parts.uri.path().trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (&parts.method, segments.as_slice()) {
        (&Method::POST, ["api", "auth", "register"]) => {
            let payload: RegisterRequest = parse_body(&body)?;
            let result = state.auth.register(payload).await?;
            Ok(json_success(StatusCode::CREATED, &result))
        }
        (&Method::POST, ["api", "auth", "login"]) => {
            let payload: LoginRequest = parse_body(&body)?;
            let result = state.auth.login(payload).await?;
            Ok(json_success(StatusCode::OK, &result))
        }
        (&Method::POST, ["api", "auth", "refresh"]) => {
            let payload: RefreshBody = parse_body(&body)?;
            let result = state.auth.refresh(&payload.refresh_token).await?;
            Ok(json_success(StatusCode::OK, &result))
        }
        (&Method::GET, ["api", "auth", "me"]) => {
            let token = bearer_token(parts)?;
            let profile = state.auth.me(token).await?;
            Ok(json_success(StatusCode::OK, &profile))
        }
        (&Method::GET, ["api", "modules"]) => {
            let params = query::parse(parts.uri.query())?;
            let (filter, sort) = query::module_query(&params)?;
            let page = query::page(&params)?;
            let result = state.modules.list(&filter, sort, page).await?;
            Ok(json_success(StatusCode::OK, &result))
        }
        (&Method::POST, ["api", "modules"]) => {
            let claims = authenticate(state, parts)?;
            let input: NewModule = parse_body(&body)?;
            let module = state.modules.create(claims.role, input).await?;
            Ok(json_success(StatusCode::CREATED, &module))
        }
        (&Method::PUT, ["api", "modules", module_id]) => {
            let claims = authenticate(state, parts)?;
            let input: NewModule = parse_body(&body)?;
            let module = state.modules.update(claims.role, module_id, input).await?;
            Ok(json_success(StatusCode::OK, &module))
        }
        (&Method::POST, ["api", "modules", "generate"]) => {
            let payload: GenerateRequest = parse_body(&body)?;
            let result = state.modules.generate(payload).await?;
            Ok(json_success(StatusCode::OK, &result))
        }
        (&Method::GET, ["api", "prompts"]) => {
            let params = query::parse(parts.uri.query())?;
            let (filter, sort) = query::prompt_query(&params)?;
            let page = query::page(&params)?;
            let result = state.prompts.list(&filter, sort, page).await?;
            Ok(json_success(StatusCode::OK, &result))
        }
        (&Method::POST, ["api", "prompts"]) => {
            let claims = authenticate(state, parts)?;
            let input: NewPrompt = parse_body(&body)?;
            let prompt = state.prompts.create(claims.role, &claims.sub, input).await?;
            Ok(json_success(StatusCode::CREATED, &prompt))
        }
        (&Method::POST, ["api", "prompts", prompt_id, "usage"]) => {
            let payload: UsageBody = parse_body(&body)?;
            let ack = state.prompts.track_usage(prompt_id, payload.success).await?;
            Ok(json_success(StatusCode::OK, &ack))
        }
        (&Method::GET, ["api", "health"]) => Ok(health(state).await),
        _ => Err(ApiError::NotFound("Not found".to_string())),
    }
}

/// The health probe answers outside the envelope and reports storage state.
async fn health(state: &AppState) -> Response<Full<Bytes>> {
    let storage_healthy = state.store.verify().await;
    let status = if storage_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_plain(
        status,
        &json!({
            "status": "ok",
            "environment": state.environment.as_str(),
            "storage": if storage_healthy { "available" } else { "error" },
            "timestamp": Utc::now().to_rfc3339(),
        }),
    )
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Validation(format!("Invalid JSON payload: {err}")))
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingAuthorization)?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::MissingAuthorization.into())
}

fn authenticate(state: &AppState, parts: &Parts) -> Result<Claims, ApiError> {
    let token = bearer_token(parts)?;
    Ok(state.auth.signer().verify_access(token)?)
}
