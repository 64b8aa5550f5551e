// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Token signing/verification and password hashing.

mod jwt;
mod password;

pub use jwt::{Claims, TokenSigner, TokenType};
pub use password::{hash_password, verify_password};
