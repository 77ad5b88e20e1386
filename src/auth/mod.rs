// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the gateway.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` (HS256 JWT)
//! 2. The authentication middleware:
//!    - verifies the signature against the process-wide signing key
//!    - resolves the token subject through the identity resolver
//!    - validates subject and expiry, then populates the per-request
//!      [`SecurityContext`]
//! 3. The enforcement middleware rejects unauthenticated requests on
//!    non-public paths
//! 4. Exception translation renders every failure as a closed-code JSON
//!    envelope at the outermost layer
//!
//! ## Security
//!
//! - The signing key is loaded once at startup and never logged
//! - Signatures are verified (constant-time) before any claim is trusted
//! - Credential failures collapse to a single wire-level error code

pub mod context;
pub mod enforce;
pub mod error;
pub mod exception;
pub mod extractor;
pub mod middleware;
pub mod resolver;
pub mod token;
pub mod validator;

pub use context::{Authentication, Principal, RequestDetails, SecurityContext};
pub use error::AuthError;
pub use exception::{ErrorCode, ErrorEnvelope};
pub use extractor::Auth;
pub use resolver::{IdentityResolver, InMemoryDirectory};
pub use token::{Claims, SigningKey, TokenCodec};
pub use validator::TokenValidator;
