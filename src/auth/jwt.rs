// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HS256 JWT issuance and verification.
//!
//! Access and refresh tokens are signed with separate secrets and carry an
//! explicit type claim, so a refresh token can never pass where an access
//! token is expected.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::errors::AuthError;
use crate::models::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub role: UserRole,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenSigner {
    config: JwtConfig,
}

impl TokenSigner {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn sign_access(&self, user_id: &str, role: UserRole) -> Result<String, AuthError> {
        self.sign(user_id, role, TokenType::Access)
    }

    pub fn sign_refresh(&self, user_id: &str, role: UserRole) -> Result<String, AuthError> {
        self.sign(user_id, role, TokenType::Refresh)
    }

    /// Verify an access token, rejecting refresh tokens outright.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenType::Access)
    }

    /// Verify a refresh token, rejecting access tokens outright.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenType::Refresh)
    }

    fn sign(&self, user_id: &str, role: UserRole, kind: TokenType) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = match kind {
            TokenType::Access => self.config.access_ttl,
            TokenType::Refresh => self.config.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            token_type: kind,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_for(kind).as_bytes()),
        )
        .map_err(AuthError::Signing)
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_for(expected).as_bytes()),
            &validation,
        )
        .map_err(AuthError::InvalidToken)?;

        if data.claims.token_type != expected {
            return Err(AuthError::WrongTokenType);
        }
        Ok(data.claims)
    }

    fn secret_for(&self, kind: TokenType) -> &str {
        match kind {
            TokenType::Access => &self.config.secret,
            TokenType::Refresh => &self.config.refresh_secret,
        }
    }
}
