// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! Collaborators are constructed explicitly at startup and injected here;
//! there is no dependency-injection container and no process-wide mutable
//! state. Everything in `AppState` is immutable and shared read-only across
//! request tasks.

use std::sync::Arc;

use crate::auth::resolver::IdentityResolver;
use crate::auth::token::TokenCodec;
use crate::auth::validator::TokenValidator;

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub validator: Arc<TokenValidator>,
    pub resolver: Arc<dyn IdentityResolver>,
    /// Path prefixes exempt from authentication enforcement
    pub public_paths: Arc<[String]>,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        resolver: Arc<dyn IdentityResolver>,
        public_paths: Vec<String>,
    ) -> Self {
        let codec = Arc::new(codec);
        Self {
            validator: Arc::new(TokenValidator::new(codec.clone())),
            codec,
            resolver,
            public_paths: public_paths.into(),
        }
    }
}
