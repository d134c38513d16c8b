// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Notarization lifecycle policy.
//!
//! This layer gates every mutating operation on the record's current lock
//! state before the chain client is invoked:
//!
//! - `Locked` records reject state updates, metadata updates, and transfer.
//! - Destroy requires a positive destroy-allowance read.
//! - A locked creation with a delete lock must carry a future unlock time.
//!
//! Lock state is never cached. Every mutating call re-fetches details from
//! the chain, which remains the only authority.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::chain::{
    ChainError, CreateReceipt, NotarizationClient, NotarizationDetails, NotarizationMethod,
    NotarizationState, TimeLock,
};
use crate::config::NETWORK_NAME;
use crate::wallet::Wallet;

/// Failures surfaced by the policy layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rejected before any chain call: the input itself is invalid.
    #[error("{0}")]
    Validation(String),

    /// Rejected by the lifecycle policy. Non-retryable; the record's lock
    /// state forbids the operation.
    #[error("{0}")]
    Policy(String),

    /// The chain call itself failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Result of a creation call.
#[derive(Debug, Clone)]
pub struct CreatedNotarization {
    pub notarization_id: String,
    pub tx_digest: String,
    pub method: NotarizationMethod,
    pub timestamp: DateTime<Utc>,
}

/// Result of a mutation on an existing record.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub tx_digest: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a verification request.
///
/// Verification soft-fails: a missing or unreadable record is reported as
/// `verified: false` with an error message, never as a propagated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub verified: bool,
    /// Present when the record could be read: whether stored content equals
    /// the expected content.
    pub matched: Option<bool>,
    /// The record's stored content, when readable.
    pub actual_content: Option<String>,
    pub error: Option<String>,
}

/// Live wallet summary.
#[derive(Debug, Clone)]
pub struct WalletInfo {
    pub address: String,
    pub balance: String,
    pub network: String,
    pub has_private_key: bool,
}

/// Service health report.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub healthy: bool,
    pub wallet: Option<WalletInfo>,
    pub error: Option<String>,
    pub package_id: String,
    pub network: String,
    pub timestamp: DateTime<Utc>,
}

pub struct NotarizationService {
    client: Arc<dyn NotarizationClient>,
    wallet: Arc<Wallet>,
    package_id: String,
}

impl std::fmt::Debug for NotarizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotarizationService")
            .field("package_id", &self.package_id)
            .finish_non_exhaustive()
    }
}

impl NotarizationService {
    pub fn new(
        client: Arc<dyn NotarizationClient>,
        wallet: Arc<Wallet>,
        package_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            wallet,
            package_id: package_id.into(),
        }
    }

    pub async fn create_dynamic(
        &self,
        state: NotarizationState,
        description: Option<String>,
        transfer_lock: TimeLock,
    ) -> Result<CreatedNotarization, ServiceError> {
        let receipt = self
            .client
            .create_dynamic(state, description, transfer_lock)
            .await?;
        tracing::info!(notarization_id = %receipt.notarization_id, "created dynamic notarization");
        Ok(created(receipt, NotarizationMethod::Dynamic))
    }

    pub async fn create_locked(
        &self,
        state: NotarizationState,
        description: Option<String>,
        delete_unlock_at: Option<u64>,
    ) -> Result<CreatedNotarization, ServiceError> {
        let delete_lock = match delete_unlock_at {
            Some(ts) => {
                if ts <= unix_now() {
                    return Err(ServiceError::Validation(
                        "unlockAt timestamp must be in the future".into(),
                    ));
                }
                TimeLock::UnlockAt(ts)
            }
            // No delete lock: the record is destroyable immediately.
            None => TimeLock::None,
        };

        let receipt = self
            .client
            .create_locked(state, description, delete_lock)
            .await?;
        tracing::info!(notarization_id = %receipt.notarization_id, "created locked notarization");
        Ok(created(receipt, NotarizationMethod::Locked))
    }

    pub async fn update_state(
        &self,
        id: &str,
        state: NotarizationState,
    ) -> Result<Mutation, ServiceError> {
        self.reject_if_locked(id, "Cannot update state of a locked notarization - it is immutable")
            .await?;
        let receipt = self.client.update_state(id, state).await?;
        Ok(mutation(receipt.tx_digest))
    }

    pub async fn update_metadata(
        &self,
        id: &str,
        metadata: Option<String>,
    ) -> Result<Mutation, ServiceError> {
        self.reject_if_locked(
            id,
            "Cannot update metadata of a locked notarization - it is immutable",
        )
        .await?;
        let receipt = self.client.update_metadata(id, metadata).await?;
        Ok(mutation(receipt.tx_digest))
    }

    pub async fn transfer(&self, id: &str, recipient: &str) -> Result<Mutation, ServiceError> {
        // Locked records are non-transferable by construction, independent
        // of any transfer-lock timestamp.
        self.reject_if_locked(id, "Cannot transfer a locked notarization - it is non-transferable")
            .await?;
        let receipt = self.client.transfer(id, recipient).await?;
        Ok(mutation(receipt.tx_digest))
    }

    pub async fn destroy(&self, id: &str) -> Result<Mutation, ServiceError> {
        if !self.client.is_destroy_allowed(id).await? {
            return Err(ServiceError::Policy(
                "Cannot destroy notarization - it may be locked or have active delete locks".into(),
            ));
        }
        let receipt = self.client.destroy(id).await?;
        tracing::info!(notarization_id = %id, "destroyed notarization");
        Ok(mutation(receipt.tx_digest))
    }

    /// Fan-out read of every record field.
    ///
    /// All sub-reads run concurrently and are joined; if any of them fails
    /// the whole read fails. There is no partial result.
    pub async fn details(&self, id: &str) -> Result<NotarizationDetails, ServiceError> {
        let (
            state,
            version_count,
            description,
            updatable_metadata,
            created_at,
            method,
            transfer_locked,
            update_locked,
            destroy_allowed,
        ) = tokio::try_join!(
            self.client.state(id),
            self.client.state_version_count(id),
            self.client.description(id),
            self.client.updatable_metadata(id),
            self.client.created_at(id),
            self.client.method(id),
            self.client.is_transfer_locked(id),
            self.client.is_update_locked(id),
            self.client.is_destroy_allowed(id),
        )?;

        Ok(NotarizationDetails {
            state,
            version_count,
            description,
            updatable_metadata,
            created_at,
            method,
            transfer_locked,
            update_locked,
            destroy_allowed,
        })
    }

    /// Compare the record's stored content against `expected_content`.
    pub async fn verify(&self, id: &str, expected_content: &str) -> VerifyOutcome {
        match self.client.state(id).await {
            Ok(state) => {
                let matched = state.content == expected_content;
                VerifyOutcome {
                    verified: matched,
                    matched: Some(matched),
                    actual_content: Some(state.content),
                    error: None,
                }
            }
            Err(err) => {
                tracing::debug!(notarization_id = %id, %err, "verification read failed");
                VerifyOutcome {
                    verified: false,
                    matched: None,
                    actual_content: None,
                    error: Some("Notarization not found or inaccessible".into()),
                }
            }
        }
    }

    /// Wallet address and live balance. The balance is never cached.
    pub async fn wallet_info(&self) -> Result<WalletInfo, ServiceError> {
        let balance = self.client.balance(self.wallet.address()).await?;
        Ok(WalletInfo {
            address: self.wallet.address().to_string(),
            balance,
            network: NETWORK_NAME.to_string(),
            has_private_key: self.wallet.has_private_key(),
        })
    }

    /// Health is derived from a live wallet query; there is no other state
    /// to probe.
    pub async fn health(&self) -> HealthReport {
        match self.wallet_info().await {
            Ok(wallet) => HealthReport {
                healthy: true,
                wallet: Some(wallet),
                error: None,
                package_id: self.package_id.clone(),
                network: NETWORK_NAME.to_string(),
                timestamp: Utc::now(),
            },
            Err(err) => HealthReport {
                healthy: false,
                wallet: None,
                error: Some(err.to_string()),
                package_id: self.package_id.clone(),
                network: NETWORK_NAME.to_string(),
                timestamp: Utc::now(),
            },
        }
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Re-fetch the record's method and reject the operation if it is
    /// `Locked`. Always a fresh read; the chain is authoritative.
    async fn reject_if_locked(&self, id: &str, message: &str) -> Result<(), ServiceError> {
        let details = self.details(id).await?;
        if details.method == NotarizationMethod::Locked {
            return Err(ServiceError::Policy(message.to_string()));
        }
        Ok(())
    }
}

fn created(receipt: CreateReceipt, method: NotarizationMethod) -> CreatedNotarization {
    CreatedNotarization {
        notarization_id: receipt.notarization_id,
        tx_digest: receipt.tx_digest,
        method,
        timestamp: Utc::now(),
    }
}

fn mutation(tx_digest: String) -> Mutation {
    Mutation {
        tx_digest,
        timestamp: Utc::now(),
    }
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
