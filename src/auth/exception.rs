// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Exception translation: the outermost guarded scope of the request chain.
//!
//! Every failure raised inside the chain is rendered exactly once, as a JSON
//! envelope carrying a code from the closed [`ErrorCode`] enumeration.
//! Authentication failures go through [`ErrorEnvelope`] via the
//! `IntoResponse` impl on `AuthError`; anything else that escapes a handler
//! or layer is caught by [`handle_panic`] (installed as a custom
//! `CatchPanicLayer` handler at the top of the router) and converted to the
//! generic internal-error envelope. The original failure detail is logged,
//! never serialized to the client.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::error::AuthError;

/// Closed set of wire-level error codes.
///
/// This is the only thing the error serialization path can emit; arbitrary
/// error object graphs never reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Credential problem: malformed, bad signature, expired, or the
    /// subject cannot be resolved
    WrongJwtToken,
    /// Authenticated access required but not established
    AccessDenied,
    /// Unhandled failure inside the request chain
    CaughtException,
}

/// Wire-level error representation: `{"errorCode": "..."}` plus an optional
/// fixed message. Never carries internal exception detail.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    #[serde(skip)]
    status: StatusCode,
    #[serde(rename = "errorCode")]
    error_code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl ErrorEnvelope {
    /// Envelope for any credential failure.
    pub fn wrong_token() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error_code: ErrorCode::WrongJwtToken,
            message: Some("Got a wrong JWT-token in Authorization header"),
        }
    }

    /// Envelope for unauthenticated access to a protected path.
    pub fn access_denied() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error_code: ErrorCode::AccessDenied,
            message: Some("Authentication is required to access this resource"),
        }
    }

    /// Envelope for an unhandled failure. Carries no message at all; the
    /// detail belongs in the log.
    pub fn caught_exception() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: ErrorCode::CaughtException,
            message: None,
        }
    }
}

impl From<&AuthError> for ErrorEnvelope {
    fn from(error: &AuthError) -> Self {
        match error.error_code() {
            ErrorCode::WrongJwtToken => Self::wrong_token(),
            ErrorCode::AccessDenied => Self::access_denied(),
            ErrorCode::CaughtException => Self::caught_exception(),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Translate a panic anywhere in the wrapped chain into the generic
/// internal-error envelope.
///
/// Installed via `CatchPanicLayer::custom` as the outermost layer of the
/// router, so no unhandled failure ever reaches the transport unstructured.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(detail = %detail, "request handling panicked");

    ErrorEnvelope::caught_exception().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    #[test]
    fn envelope_serializes_only_the_closed_code_set() {
        let body = serde_json::to_string(&ErrorEnvelope::caught_exception()).unwrap();
        assert_eq!(body, r#"{"errorCode":"CAUGHT_EXCEPTION"}"#);

        let body = serde_json::to_value(ErrorEnvelope::wrong_token()).unwrap();
        assert_eq!(body["errorCode"], "WRONG_JWT_TOKEN");
        assert_eq!(
            body["message"],
            "Got a wrong JWT-token in Authorization header"
        );
    }

    #[tokio::test]
    async fn panicking_handler_yields_the_internal_envelope() {
        let app = Router::new()
            .route("/boom", get(async || -> () { panic!("kaboom: secret detail") }))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/boom")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"errorCode":"CAUGHT_EXCEPTION"}"#);
        assert!(!body.contains("kaboom"));
    }

    #[tokio::test]
    async fn successful_responses_pass_through_unchanged() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ok")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body_bytes[..], b"fine");
    }
}
