// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use std::sync::Arc;

use crate::chain::RpcNotarizationClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::service::NotarizationService;
use crate::wallet::Wallet;

/// Shared application state.
///
/// `service` is `None` when the notarization package id is not configured:
/// the server still runs and answers the index and health routes, but all
/// notarization and wallet routes return 503 via [`AppState::service`].
#[derive(Clone)]
pub struct AppState {
    pub service: Option<Arc<NotarizationService>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from configuration: bootstrap the wallet key and, if a
    /// package id is configured, the chain client and policy service.
    pub fn from_config(config: Config) -> Self {
        let service = match &config.package_id {
            Some(package_id) => {
                let wallet = Arc::new(Wallet::from_config(config.private_key.as_deref()));
                match RpcNotarizationClient::new(
                    &config.network_url,
                    package_id.as_str(),
                    wallet.clone(),
                ) {
                    Ok(client) => Some(Arc::new(NotarizationService::new(
                        Arc::new(client),
                        wallet,
                        package_id.as_str(),
                    ))),
                    Err(err) => {
                        tracing::error!(%err, "failed to build chain client; notarization routes disabled");
                        None
                    }
                }
            }
            None => {
                tracing::warn!(
                    "NOTARIZATION_PKG_ID is not set; notarization routes will answer 503"
                );
                None
            }
        };

        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// State with an explicit service, used by tests to substitute a mock
    /// chain client.
    pub fn with_service(service: Arc<NotarizationService>, config: Config) -> Self {
        Self {
            service: Some(service),
            config: Arc::new(config),
        }
    }

    /// The notarization service, or 503 when the subsystem is unconfigured.
    pub fn service(&self) -> Result<&Arc<NotarizationService>, ApiError> {
        self.service.as_ref().ok_or_else(|| {
            ApiError::service_unavailable(
                "Notarization subsystem is not configured: NOTARIZATION_PKG_ID is not set",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_package_id_disables_service() {
        let state = AppState::from_config(Config::default());
        assert!(state.service.is_none());
        let err = state.service().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn configured_package_id_enables_service() {
        let config = Config {
            package_id: Some("0xpkg".into()),
            ..Config::default()
        };
        let state = AppState::from_config(config);
        assert!(state.service().is_ok());
    }
}
