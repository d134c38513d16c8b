// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use std::env;

use tracing_subscriber::EnvFilter;

use floatly_backend::{
    api::router,
    config::{Config, LOG_FORMAT_ENV},
    state::AppState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();
    let network_url = config.network_url.clone();
    let package_id = config.package_id.clone();

    let state = AppState::from_config(config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!(
        addr = %bind_addr,
        network = %network_url,
        package_id = %package_id.as_deref().unwrap_or("NOT SET"),
        "Floatly backend listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown signal handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
