// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use axum::{extract::State, Json};

use crate::{error::ApiError, models::WalletInfoResponse, state::AppState};

/// Wallet address and live balance. The balance is queried from the chain
/// on every call, never cached.
#[utoipa::path(
    get,
    path = "/api/notarizations/wallet/info",
    tag = "System",
    responses(
        (status = 200, description = "Wallet summary", body = WalletInfoResponse),
        (status = 503, description = "Notarization subsystem not configured or network unavailable")
    )
)]
pub async fn wallet_info(
    State(state): State<AppState>,
) -> Result<Json<WalletInfoResponse>, ApiError> {
    let service = state.service()?;
    let info = service.wallet_info().await?;
    Ok(Json(info.into()))
}
