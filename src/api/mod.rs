// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::{enforce, exception, middleware};
use crate::state::AppState;

pub mod health;
pub mod me;

/// Build the gateway router.
///
/// Layer order, outermost first: CORS, request-id, trace, exception
/// translation (catch-panic), authentication, enforcement, routes. Failures
/// raised by authentication or enforcement are rendered once, as the
/// closed-code JSON envelope; they never reach the transport unstructured.
pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/me", get(me::me))
        .with_state(state.clone());

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .layer(from_fn_with_state(state.clone(), enforce::enforce))
        .layer(from_fn_with_state(state, middleware::authenticate))
        .layer(CatchPanicLayer::custom(exception::handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}
