// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth Gateway - Stateless Bearer-Token Authentication Service
//!
//! This crate provides a stateless authentication layer in front of an HTTP
//! API: it verifies HS256 bearer tokens, resolves the token subject against
//! an identity directory, establishes a per-request security context, and
//! translates every failure into a closed-code JSON error envelope.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Token codec, validation, middleware, exception translation
//! - `config` - Environment-driven runtime configuration
//! - `state` - Explicitly constructed shared collaborators

pub mod api;
pub mod auth;
pub mod config;
pub mod state;
