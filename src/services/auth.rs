// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password, TokenSigner};
use crate::errors::{ApiError, AuthError};
use crate::models::{NewUser, User, UserProfile, UserRole};
use crate::repositories::UserRepository;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub tokens: AuthTokens,
}

/// Registration, login, refresh and profile lookup.
pub struct AuthService {
    users: UserRepository,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(users: UserRepository, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError> {
        validate_register(&request)?;
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .users
            .create(NewUser {
                email: request.email,
                password_hash,
                name: request.name,
                role: request.role.unwrap_or(UserRole::User),
            })
            .await?;
        self.issue(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        validate_login(&request)?;
        let Some(user) = self.users.find_by_email(&request.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        self.users.touch(&user.id).await?;
        self.issue(user)
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        if refresh_token.trim().is_empty() {
            return Err(ApiError::Validation("Refresh token is required".to_string()));
        }
        let claims = self.signer.verify_refresh(refresh_token)?;
        let Some(user) = self.users.find_by_id(&claims.sub).await? else {
            return Err(AuthError::UserNotFound.into());
        };
        self.users.touch(&user.id).await?;
        self.issue(user)
    }

    /// Resolve an access token to the account's profile.
    pub async fn me(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let claims = self.signer.verify_access(access_token)?;
        let Some(user) = self.users.find_by_id(&claims.sub).await? else {
            return Err(AuthError::UserNotFound.into());
        };
        Ok(user.profile())
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    fn issue(&self, user: User) -> Result<AuthResponse, ApiError> {
        let tokens = AuthTokens {
            access_token: self.signer.sign_access(&user.id, user.role)?,
            refresh_token: self.signer.sign_refresh(&user.id, user.role)?,
        };
        Ok(AuthResponse {
            user: user.profile(),
            tokens,
        })
    }
}

fn validate_register(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    validate_email(&request.email)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_login(request: &LoginRequest) -> Result<(), ApiError> {
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Shallow shape check; real verification happens when mail is sent.
fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email address".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::JwtConfig;
    use crate::store::JsonStore;

    fn service() -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()));
        let signer = TokenSigner::new(JwtConfig {
            secret: "test-secret-test-secret".into(),
            refresh_secret: "refresh-secret-refresh".into(),
            access_ttl: std::time::Duration::from_secs(900),
            refresh_ttl: std::time::Duration::from_secs(604_800),
        });
        (dir, AuthService::new(UserRepository::new(store), signer))
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Avery".into(),
            email: email.into(),
            password: "hunter2hunter2".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_returns_profile_and_typed_tokens() {
        let (_dir, svc) = service();
        let result = svc.register(register_request("a@example.com")).await.unwrap();
        assert_eq!(result.user.email, "a@example.com");
        assert_eq!(result.user.role, UserRole::User);
        assert!(svc.signer().verify_access(&result.tokens.access_token).is_ok());
        assert!(svc.signer().verify_refresh(&result.tokens.refresh_token).is_ok());
        // Tokens are typed; one is never accepted in place of the other.
        assert!(svc.signer().verify_access(&result.tokens.refresh_token).is_err());
    }

    #[tokio::test]
    async fn register_rejects_weak_input() {
        let (_dir, svc) = service();
        let mut bad = register_request("a@example.com");
        bad.password = "short".into();
        assert!(matches!(
            svc.register(bad).await.unwrap_err(),
            ApiError::Validation(msg) if msg.contains("8 characters")
        ));

        let mut bad = register_request("not-an-email");
        bad.password = "hunter2hunter2".into();
        assert!(matches!(svc.register(bad).await.unwrap_err(), ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (_dir, svc) = service();
        svc.register(register_request("dup@example.com")).await.unwrap();
        let err = svc.register(register_request("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn login_round_trip_and_bad_credentials() {
        let (_dir, svc) = service();
        svc.register(register_request("l@example.com")).await.unwrap();

        let ok = svc
            .login(LoginRequest {
                email: "l@example.com".into(),
                password: "hunter2hunter2".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.user.email, "l@example.com");

        let err = svc
            .login(LoginRequest {
                email: "l@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Invalid credentials");

        // Unknown accounts get the same message as bad passwords.
        let err = svc
            .login(LoginRequest {
                email: "ghost@example.com".into(),
                password: "hunter2hunter2".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn refresh_reissues_both_tokens() {
        let (_dir, svc) = service();
        let first = svc.register(register_request("r@example.com")).await.unwrap();
        let renewed = svc.refresh(&first.tokens.refresh_token).await.unwrap();
        assert_eq!(renewed.user.id, first.user.id);
        assert!(svc.signer().verify_access(&renewed.tokens.access_token).is_ok());

        assert!(matches!(svc.refresh("").await.unwrap_err(), ApiError::Validation(_)));
        // An access token is not accepted as a refresh token.
        assert!(matches!(
            svc.refresh(&first.tokens.access_token).await.unwrap_err(),
            ApiError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn me_resolves_the_access_token() {
        let (_dir, svc) = service();
        let result = svc.register(register_request("me@example.com")).await.unwrap();
        let profile = svc.me(&result.tokens.access_token).await.unwrap();
        assert_eq!(profile.id, result.user.id);
        assert!(matches!(svc.me("garbage").await.unwrap_err(), ApiError::Unauthorized(_)));
    }
}
