// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request security context.
//!
//! The context is an explicit value carried in the request's extensions (a
//! per-request typed map), created fresh for each request and discarded with
//! it. It is deliberately not a thread-local or process-wide holder: requests
//! migrate across executor threads, and an ambient global keyed by "current
//! thread" breaks there.

use std::net::SocketAddr;

use serde::Serialize;

/// Resolved identity plus its authority set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    /// Canonical subject identifier
    pub subject: String,
    /// Granted authorities, used for downstream authorization
    pub authorities: Vec<String>,
}

/// Request metadata captured when authentication succeeds.
#[derive(Debug, Clone, Default)]
pub struct RequestDetails {
    /// Origin socket address, when the transport provides one
    pub remote_addr: Option<SocketAddr>,
    /// Session hint from the token (`sid` claim), if any
    pub session_hint: Option<String>,
}

/// A successfully established authentication.
#[derive(Debug, Clone)]
pub struct Authentication {
    pub principal: Principal,
    pub details: RequestDetails,
}

/// Holder of the current request's authentication state.
///
/// Starts unauthenticated; the authentication middleware populates it at
/// most once per request.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    authentication: Option<Authentication>,
}

impl SecurityContext {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication.is_some()
    }

    /// Establish the authentication for this request.
    pub fn authenticate(&mut self, authentication: Authentication) {
        self.authentication = Some(authentication);
    }

    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.authentication.as_ref().map(|auth| &auth.principal)
    }
}
