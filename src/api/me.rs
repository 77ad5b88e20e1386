// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated identity endpoint.

use axum::Json;

use crate::auth::context::Principal;
use crate::auth::extractor::Auth;

/// Return the principal established for this request.
pub async fn me(Auth(principal): Auth) -> Json<Principal> {
    Json(principal)
}
