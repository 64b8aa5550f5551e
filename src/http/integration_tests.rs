// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end tests for the REST surface, driving the router directly with
//! real services over a temporary data directory.

use std::time::Duration;

use bytes::Bytes;
use http::request::Parts;
use http::{Request, StatusCode};
use http_body_util::BodyExt;

use crate::config::{AppConfig, Environment, JwtConfig, ProviderConfig};
use crate::http::router::route;
use crate::http::AppState;

fn test_state(dir: &tempfile::TempDir) -> AppState {
    AppState::new(&AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: dir.path().to_path_buf(),
        environment: Environment::Test,
        jwt: JwtConfig {
            secret: "test-secret-test-secret".to_string(),
            refresh_secret: "refresh-secret-refresh".to_string(),
            access_ttl: Duration::from_secs(900),
            refresh_ttl: Duration::from_secs(604_800),
        },
        providers: ProviderConfig::default(),
    })
}

fn request(method: &str, uri: &str, bearer: Option<&str>) -> Parts {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let (parts, ()) = builder.body(()).unwrap().into_parts();
    parts
}

async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let parts = request(method, uri, bearer);
    let bytes = Bytes::from(serde_json::to_vec(&body).unwrap());
    let response = match route(state, &parts, bytes).await {
        Ok(response) => response,
        Err(err) => crate::http::envelope::json_error(&err),
    };
    let status = response.status();
    let collected = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&collected).unwrap())
}

async fn register(state: &AppState, email: &str, role: &str) -> (String, serde_json::Value) {
    let (status, json) = send(
        state,
        "POST",
        "/api/auth/register",
        None,
        serde_json::json!({
            "name": "Avery",
            "email": email,
            "password": "hunter2hunter2",
            "role": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let token = json["data"]["tokens"]["accessToken"].as_str().unwrap().to_string();
    (token, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_login_me_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (_, registered) = register(&state, "a@example.com", "user").await;
        assert_eq!(registered["success"], true);
        assert_eq!(registered["data"]["user"]["email"], "a@example.com");
        assert!(registered["data"]["user"].get("passwordHash").is_none());

        let (status, login) = send(
            &state,
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"email": "a@example.com", "password": "hunter2hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let access = login["data"]["tokens"]["accessToken"].as_str().unwrap();

        let (status, me) = send(&state, "GET", "/api/auth/me", Some(access), serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["email"], "a@example.com");
    }

    #[tokio::test]
    async fn auth_failures_use_the_envelope_and_status_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, json) = send(
            &state,
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"email": "ghost@example.com", "password": "whatever1"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid credentials");

        let (status, json) = send(&state, "GET", "/api/auth/me", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Authorization header missing");

        let (status, _) = send(
            &state,
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({"name": "", "email": "x@example.com", "password": "hunter2hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_exchanges_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (_, registered) = register(&state, "r@example.com", "user").await;
        let refresh = registered["data"]["tokens"]["refreshToken"].as_str().unwrap();

        let (status, renewed) = send(
            &state,
            "POST",
            "/api/auth/refresh",
            None,
            serde_json::json!({"refreshToken": refresh}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(renewed["data"]["tokens"]["accessToken"].is_string());

        let (status, _) = send(&state, "POST", "/api/auth/refresh", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn module_listing_filters_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.seed().await.unwrap();

        let (status, json) = send(&state, "GET", "/api/modules", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["page"], 1);

        let (status, json) = send(
            &state,
            "GET",
            "/api/modules?search=colorizer&sort=rating",
            None,
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["moduleId"], "line-colorizer");

        let (status, json) = send(
            &state,
            "GET",
            "/api/modules?sort=alphabetical",
            None,
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn module_creation_requires_an_elevated_role() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (user_token, _) = register(&state, "user@example.com", "user").await;
        let (editor_token, _) = register(&state, "editor@example.com", "editor").await;

        let module = serde_json::json!({
            "moduleId": "sky-swap",
            "name": "Sky Swap",
            "version": "0.1.0",
            "description": "Replaces the sky.",
            "category": "creative",
            "provider": "editchain studio",
        });

        let (status, _) = send(&state, "POST", "/api/modules", None, module.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = send(&state, "POST", "/api/modules", Some(&user_token), module.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["success"], false);

        let (status, json) = send(&state, "POST", "/api/modules", Some(&editor_token), module).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["moduleId"], "sky-swap");
        assert_eq!(json["data"]["costTier"], "standard");
    }

    #[tokio::test]
    async fn module_update_replaces_fields_but_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (editor_token, _) = register(&state, "editor@example.com", "editor").await;

        let module = serde_json::json!({
            "moduleId": "sky-swap",
            "name": "Sky Swap",
            "version": "0.1.0",
            "description": "Replaces the sky.",
            "category": "creative",
            "provider": "editchain studio",
        });
        let (status, created) = send(&state, "POST", "/api/modules", Some(&editor_token), module.clone()).await;
        assert_eq!(status, StatusCode::CREATED);

        let mut updated = module;
        updated["version"] = serde_json::json!("0.2.0");
        updated["description"] = serde_json::json!("Replaces the sky with any weather.");
        let (status, json) = send(
            &state,
            "PUT",
            "/api/modules/sky-swap",
            Some(&editor_token),
            updated.clone(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["version"], "0.2.0");
        assert_eq!(json["data"]["id"], created["data"]["id"]);
        assert_eq!(json["data"]["createdAt"], created["data"]["createdAt"]);

        let (status, _) = send(&state, "PUT", "/api/modules/missing", Some(&editor_token), updated).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn generate_validates_the_prompt_before_any_provider_call() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, json) = send(
            &state,
            "POST",
            "/api/modules/generate",
            None,
            serde_json::json!({"prompt": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Prompt is required");

        // Unknown model names fail fast, before needing credentials.
        let (status, _) = send(
            &state,
            "POST",
            "/api/modules/generate",
            None,
            serde_json::json!({"prompt": "a fox", "model": "Midjourney v6"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn prompt_crud_and_usage_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (editor_token, _) = register(&state, "e@example.com", "editor").await;

        let (status, created) = send(
            &state,
            "POST",
            "/api/prompts",
            Some(&editor_token),
            serde_json::json!({
                "promptId": "warm-light",
                "name": "Warm Light",
                "content": "Bathe the scene in warm evening light.",
                "category": "lighting",
                "accessLevel": ["user"],
                "createdBy": "",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        assert_eq!(created["data"]["usageCount"], 0);

        let (status, ack) = send(
            &state,
            "POST",
            "/api/prompts/warm-light/usage",
            None,
            serde_json::json!({"success": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["data"]["promptId"], "warm-light");

        let (status, listed) = send(
            &state,
            "GET",
            "/api/prompts?category=lighting",
            None,
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["data"]["items"][0]["usageCount"], 1);
        assert_eq!(listed["data"]["items"][0]["successRate"], 1.0);
    }

    #[tokio::test]
    async fn health_reports_environment_and_storage() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, json) = send(&state, "GET", "/api/health", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["environment"], "test");
        assert_eq!(json["storage"], "available");
        assert!(json.get("success").is_none());
    }

    #[tokio::test]
    async fn unknown_routes_are_enveloped_404s() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, json) = send(&state, "GET", "/api/unknown", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        let (status, _) = send(&state, "DELETE", "/api/modules", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
