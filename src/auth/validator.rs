// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token validation against a resolved identity.

use std::sync::Arc;

use super::error::AuthError;
use super::token::TokenCodec;

/// Decides whether a token is currently valid for a claimed identity.
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Check that `token` belongs to `expected_subject` and has not expired.
    ///
    /// Policy: malformed tokens and invalid signatures always propagate as
    /// errors; expiry and subject mismatch always return `Ok(false)`. The
    /// two failure classes must never be conflated: a well-formed token for
    /// the wrong subject is a rejection, not a credential error.
    pub fn is_valid(
        &self,
        token: &str,
        expected_subject: &str,
        now: i64,
    ) -> Result<bool, AuthError> {
        let claims = match self.codec.decode(token, now) {
            Ok(claims) => claims,
            Err(AuthError::TokenExpired) => return Ok(false),
            Err(err) => return Err(err),
        };

        Ok(claims.sub == expected_subject && claims.exp > now)
    }
}
