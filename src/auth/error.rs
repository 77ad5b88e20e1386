// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::exception::{ErrorCode, ErrorEnvelope};

/// Authentication failure raised while processing a request.
///
/// Subject mismatch and expiry discovered during validation are not errors;
/// they surface as a `false` return from `TokenValidator::is_valid`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token structure cannot be parsed
    #[error("token is malformed")]
    MalformedToken,
    /// Token signature does not verify against the signing key
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token signature is valid but `exp` is in the past
    #[error("token has expired")]
    TokenExpired,
    /// The identity resolver has no record for the token subject
    #[error("no identity found for subject {0:?}")]
    IdentityNotFound(String),
    /// Unauthenticated request on a path that requires authentication
    #[error("authentication is required to access this resource")]
    AccessDenied,
}

impl AuthError {
    /// Wire-level error code for this failure.
    ///
    /// Every credential failure collapses to the single invalid-credential
    /// code; the client learns nothing about which check failed.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::IdentityNotFound(_) => ErrorCode::WrongJwtToken,
            AuthError::AccessDenied => ErrorCode::AccessDenied,
        }
    }

    /// HTTP status for this failure.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Variant detail (including the unresolved subject) stays in the log.
        tracing::debug!(error = %self, "request rejected during authentication");
        ErrorEnvelope::from(&self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn credential_errors_share_the_invalid_credential_envelope() {
        for error in [
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::IdentityNotFound("ghost".to_string()),
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            assert_eq!(body["errorCode"], "WRONG_JWT_TOKEN");
        }
    }

    #[tokio::test]
    async fn identity_not_found_does_not_leak_the_subject() {
        let response = AuthError::IdentityNotFound("ghost".to_string()).into_response();
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(!body.contains("ghost"));
    }

    #[tokio::test]
    async fn access_denied_uses_its_own_code() {
        let response = AuthError::AccessDenied.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["errorCode"], "ACCESS_DENIED");
    }
}
