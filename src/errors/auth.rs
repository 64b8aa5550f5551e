// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Authentication and authorization errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The email is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// Wrong email or password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No account matches the token subject.
    #[error("User not found")]
    UserNotFound,

    /// The Authorization header is missing or not a Bearer token.
    #[error("Authorization header missing")]
    MissingAuthorization,

    /// The token failed signature or expiry checks.
    #[error("Invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Token creation failed; an internal fault, not a client mistake.
    #[error("Token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// A refresh token was presented where an access token was expected, or
    /// vice versa.
    #[error("Invalid token type")]
    WrongTokenType,

    /// bcrypt failed; treated as an internal error, never a user mistake.
    #[error("Password hashing failed")]
    Hashing(#[from] bcrypt::BcryptError),
}
