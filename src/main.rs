// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use auth_gateway::api::router;
use auth_gateway::auth::resolver::InMemoryDirectory;
use auth_gateway::auth::token::TokenCodec;
use auth_gateway::config::{Config, LogFormat};
use auth_gateway::state::AppState;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let key = match config.signing_key() {
        Ok(key) => key,
        Err(err) => {
            tracing::error!(%err, "configuration error");
            std::process::exit(1);
        }
    };

    // Explicit construction: codec, validator and resolver are built here
    // and injected through AppState. No container, no globals.
    let codec = TokenCodec::new(key, config.token_ttl_seconds);

    let directory = InMemoryDirectory::new();
    if let Ok(seed) = env::var("SEED_USERS") {
        seed_directory(&directory, &seed).await;
    }

    let state = AppState::new(codec, Arc::new(directory), config.public_paths.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, ttl = config.token_ttl_seconds, "auth gateway listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server failed");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Seed the in-memory directory from `SEED_USERS`
/// (`subject=authority|authority;...`).
async fn seed_directory(directory: &InMemoryDirectory, seed: &str) {
    for entry in seed.split(';').filter(|entry| !entry.is_empty()) {
        let (subject, authorities) = entry.split_once('=').unwrap_or((entry, ""));
        let authorities: Vec<String> = authorities
            .split('|')
            .filter(|authority| !authority.is_empty())
            .map(str::to_owned)
            .collect();
        tracing::info!(subject, ?authorities, "seeded directory entry");
        directory.insert(subject, authorities).await;
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl-c");
    tracing::info!("shutdown signal received");
}
