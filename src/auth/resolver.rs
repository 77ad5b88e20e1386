// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution.
//!
//! The authentication middleware looks up the token subject through
//! [`IdentityResolver`]; the backing store (user service, LDAP, database) is
//! a collaborator behind this trait. [`InMemoryDirectory`] is the in-process
//! implementation used for wiring and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::context::Principal;
use super::error::AuthError;

/// Resolves a subject identifier to a principal and its authority set.
///
/// Implementations may perform network I/O and must be safe for concurrent
/// invocation.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Look up `subject`. Fails with `AuthError::IdentityNotFound` when no
    /// identity exists for it.
    async fn resolve(&self, subject: &str) -> Result<Principal, AuthError>;
}

/// In-process identity directory.
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject with its authorities, replacing any previous entry.
    pub async fn insert(&self, subject: impl Into<String>, authorities: Vec<String>) {
        self.entries.write().await.insert(subject.into(), authorities);
    }
}

#[async_trait]
impl IdentityResolver for InMemoryDirectory {
    async fn resolve(&self, subject: &str) -> Result<Principal, AuthError> {
        let entries = self.entries.read().await;
        match entries.get(subject) {
            Some(authorities) => Ok(Principal {
                subject: subject.to_string(),
                authorities: authorities.clone(),
            }),
            None => Err(AuthError::IdentityNotFound(subject.to_string())),
        }
    }
}
