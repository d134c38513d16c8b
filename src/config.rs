// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `NETWORK_URL` | Fullnode RPC endpoint | public testnet fullnode |
//! | `NOTARIZATION_PKG_ID` | On-chain notarization package id | Required for the notarization subsystem |
//! | `CORS_ORIGIN` | Allowed CORS origin | permissive |
//! | `PRIVATE_KEY` | Signing key (bech32 `iotaprivkey1…` or base64 seed) | ephemeral keypair |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! A missing `NOTARIZATION_PKG_ID` is not a boot failure: the server still
//! starts and answers `/` and health probes, but every notarization and
//! wallet route responds 503 until the package id is configured.

use std::env;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the fullnode RPC endpoint.
pub const NETWORK_URL_ENV: &str = "NETWORK_URL";

/// Environment variable name for the on-chain notarization package id.
pub const NOTARIZATION_PKG_ID_ENV: &str = "NOTARIZATION_PKG_ID";

/// Environment variable name for the allowed CORS origin.
pub const CORS_ORIGIN_ENV: &str = "CORS_ORIGIN";

/// Environment variable name for the wallet signing key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Public testnet fullnode used when `NETWORK_URL` is unset.
pub const DEFAULT_NETWORK_URL: &str = "https://api.testnet.iota.cafe";

/// Name of the network the service reports in responses.
pub const NETWORK_NAME: &str = "testnet";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub network_url: String,
    pub package_id: Option<String>,
    pub cors_origin: Option<String>,
    pub private_key: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            host: env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var(PORT_ENV)
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            network_url: env::var(NETWORK_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_NETWORK_URL.to_string()),
            package_id: env::var(NOTARIZATION_PKG_ID_ENV).ok().filter(|s| !s.is_empty()),
            cors_origin: env::var(CORS_ORIGIN_ENV).ok().filter(|s| !s.is_empty()),
            private_key: env::var(PRIVATE_KEY_ENV).ok().filter(|s| !s.is_empty()),
        }
    }

    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            network_url: DEFAULT_NETWORK_URL.to_string(),
            package_id: None,
            cors_origin: None,
            private_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
        assert_eq!(config.network_url, DEFAULT_NETWORK_URL);
        assert!(config.package_id.is_none());
        assert!(config.private_key.is_none());
    }
}
