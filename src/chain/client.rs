// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! The chain boundary trait.
//!
//! Everything the service knows about the notarization network goes through
//! [`NotarizationClient`]. The production implementation is
//! [`super::rpc::RpcNotarizationClient`]; tests substitute an in-memory
//! mock so the lifecycle policy can be exercised without a network and with
//! assertions on which mutations were (not) submitted.

use async_trait::async_trait;

use super::types::{
    ChainError, CreateReceipt, NotarizationMethod, NotarizationState, TimeLock, TxReceipt,
};

#[async_trait]
pub trait NotarizationClient: Send + Sync {
    // Mutations. Each submits exactly one transaction; no retries.

    async fn create_dynamic(
        &self,
        state: NotarizationState,
        description: Option<String>,
        transfer_lock: TimeLock,
    ) -> Result<CreateReceipt, ChainError>;

    async fn create_locked(
        &self,
        state: NotarizationState,
        description: Option<String>,
        delete_lock: TimeLock,
    ) -> Result<CreateReceipt, ChainError>;

    async fn update_state(
        &self,
        id: &str,
        state: NotarizationState,
    ) -> Result<TxReceipt, ChainError>;

    async fn update_metadata(
        &self,
        id: &str,
        metadata: Option<String>,
    ) -> Result<TxReceipt, ChainError>;

    async fn transfer(&self, id: &str, recipient: &str) -> Result<TxReceipt, ChainError>;

    async fn destroy(&self, id: &str) -> Result<TxReceipt, ChainError>;

    // Reads. Always live; the service never caches any of these.

    async fn state(&self, id: &str) -> Result<NotarizationState, ChainError>;

    async fn state_version_count(&self, id: &str) -> Result<u64, ChainError>;

    async fn description(&self, id: &str) -> Result<Option<String>, ChainError>;

    async fn updatable_metadata(&self, id: &str) -> Result<Option<String>, ChainError>;

    async fn created_at(&self, id: &str) -> Result<u64, ChainError>;

    async fn method(&self, id: &str) -> Result<NotarizationMethod, ChainError>;

    async fn is_transfer_locked(&self, id: &str) -> Result<bool, ChainError>;

    async fn is_update_locked(&self, id: &str) -> Result<bool, ChainError>;

    async fn is_destroy_allowed(&self, id: &str) -> Result<bool, ChainError>;

    /// Native token balance of `address`, as the node reports it.
    async fn balance(&self, address: &str) -> Result<String, ChainError>;
}
