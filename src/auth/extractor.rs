// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated principal.
//!
//! Use the `Auth` extractor in handlers that need the caller's identity:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal.subject, principal.authorities
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::context::{Principal, SecurityContext};
use super::error::AuthError;

/// Extractor yielding the principal established by the authentication
/// middleware. Rejects with the access-denied envelope when the request is
/// unauthenticated.
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(|context| context.principal().cloned())
            .map(Auth)
            .ok_or(AuthError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::context::{Authentication, RequestDetails};
    use axum::http::Request;

    fn parts_with_context(context: Option<SecurityContext>) -> Parts {
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        if let Some(context) = context {
            parts.extensions.insert(context);
        }
        parts
    }

    #[tokio::test]
    async fn rejects_without_a_security_context() {
        let mut parts = parts_with_context(None);
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }

    #[tokio::test]
    async fn rejects_an_unauthenticated_context() {
        let mut parts = parts_with_context(Some(SecurityContext::unauthenticated()));
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }

    #[tokio::test]
    async fn yields_the_authenticated_principal() {
        let mut context = SecurityContext::unauthenticated();
        context.authenticate(Authentication {
            principal: Principal {
                subject: "alice".to_string(),
                authorities: vec!["client".to_string()],
            },
            details: RequestDetails::default(),
        });

        let mut parts = parts_with_context(Some(context));
        let Auth(principal) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(principal.subject, "alice");
    }
}
