// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route enforcement.
//!
//! Runs after authentication: requests whose path is on the configured
//! public allow-list pass through regardless of authentication state; every
//! other request must carry an authenticated security context or is rejected
//! with the access-denied envelope.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::context::SecurityContext;
use super::error::AuthError;
use crate::state::AppState;

/// Enforcement middleware function.
pub async fn enforce(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path();
    if is_public(&state.public_paths, path) {
        return Ok(next.run(request).await);
    }

    let authenticated = request
        .extensions()
        .get::<SecurityContext>()
        .map(SecurityContext::is_authenticated)
        .unwrap_or(false);

    if authenticated {
        Ok(next.run(request).await)
    } else {
        Err(AuthError::AccessDenied)
    }
}

fn is_public(public_paths: &[String], path: &str) -> bool {
    public_paths.iter().any(|prefix| path.starts_with(prefix.as_str()))
}
