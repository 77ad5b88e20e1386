// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token authentication middleware.
//!
//! Runs once per request, before enforcement and route handling:
//!
//! 1. No `Authorization` header, a non-UTF-8 value, or a missing `Bearer `
//!    prefix: the chain continues unauthenticated. Not an error.
//! 2. Token decode failures (malformed, bad signature, expired) propagate to
//!    exception translation; they are never swallowed here.
//! 3. The subject is resolved through the identity resolver; an unknown
//!    subject propagates as an error too.
//! 4. If the validator accepts the token for the resolved principal, the
//!    security context is populated; otherwise the request continues
//!    unauthenticated. Enforcement is a separate stage.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use super::context::{Authentication, RequestDetails, SecurityContext};
use super::error::AuthError;
use crate::state::AppState;

/// Prefix of the Authorization header.
const BEARER_PREFIX: &str = "Bearer ";

/// Authentication middleware function.
///
/// Idempotent with respect to an already-populated context: if an earlier
/// stage authenticated the request, the token is not processed again.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let mut context = request
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default();

    if let Some(token) = bearer_token(request.headers()) {
        if !context.is_authenticated() {
            let now = Utc::now().timestamp();
            let claims = state.codec.decode(token, now)?;
            let principal = state.resolver.resolve(&claims.sub).await?;

            if state.validator.is_valid(token, &principal.subject, now)? {
                let details = RequestDetails {
                    remote_addr: request
                        .extensions()
                        .get::<ConnectInfo<std::net::SocketAddr>>()
                        .map(|info| info.0),
                    session_hint: claims.session_hint().map(str::to_owned),
                };
                tracing::debug!(subject = %principal.subject, "request authenticated");
                context.authenticate(Authentication { principal, details });
            } else {
                tracing::debug!(
                    subject = %principal.subject,
                    "token rejected for resolved principal, continuing unauthenticated"
                );
            }
        }
    }

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header.
///
/// Absence, a non-UTF-8 value, or a wrong prefix all mean "no credential".
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_the_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_no_credential() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn wrong_prefix_yields_no_credential() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn non_utf8_header_yields_no_credential() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
