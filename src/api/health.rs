// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::NETWORK_NAME;
use crate::state::AppState;

/// Wallet summary embedded in the health response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthWallet {
    pub address: String,
    pub balance: String,
    pub has_private_key: bool,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    /// `"healthy"`, `"degraded"` (subsystem unconfigured) or `"unhealthy"`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<HealthWallet>,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint handler.
///
/// Healthy means the wallet balance could be fetched from the network. A
/// missing package id degrades health but does not fail the probe: the
/// process itself is serving.
#[utoipa::path(
    get,
    path = "/api/notarizations/health",
    tag = "System",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 500, description = "Service cannot reach the network", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = chrono::Utc::now().to_rfc3339();

    let Some(service) = state.service.as_ref() else {
        let response = HealthResponse {
            success: true,
            status: "degraded".to_string(),
            message: Some("Notarization subsystem is not configured".to_string()),
            wallet: None,
            network: NETWORK_NAME.to_string(),
            package_id: None,
            timestamp,
            error: None,
        };
        return (StatusCode::OK, Json(response));
    };

    let report = service.health().await;
    let response = HealthResponse {
        success: report.healthy,
        status: if report.healthy { "healthy" } else { "unhealthy" }.to_string(),
        message: report
            .healthy
            .then(|| "Floatly notarization backend is healthy".to_string()),
        wallet: report.wallet.map(|w| HealthWallet {
            address: w.address,
            balance: w.balance,
            has_private_key: w.has_private_key,
        }),
        network: report.network,
        package_id: Some(report.package_id),
        timestamp: report.timestamp.to_rfc3339(),
        error: report.error,
    };

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(response))
}
