// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! # API Data Models
//!
//! Request and response bodies for the REST API. Field names are camelCase
//! on the wire, matching the contract the Floatly front-end consumes. Every
//! response body carries a `success` boolean; failure bodies are produced
//! by [`crate::error::ApiError`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::chain::{NotarizationMethod, TimeLock};
use crate::service::{CreatedNotarization, Mutation, VerifyOutcome, WalletInfo};

// =============================================================================
// Lock Specifications
// =============================================================================

/// Transfer-lock policy for dynamic records, set only at creation.
///
/// `unlockAt` takes precedence over `untilDestroyed` when both are given.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferLockSpec {
    /// Unix timestamp (seconds) at which the lock releases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_at: Option<u64>,
    /// Lock the record until it is destroyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_destroyed: Option<bool>,
}

impl From<&TransferLockSpec> for TimeLock {
    fn from(spec: &TransferLockSpec) -> Self {
        if let Some(ts) = spec.unlock_at {
            TimeLock::UnlockAt(ts)
        } else if spec.until_destroyed == Some(true) {
            TimeLock::UntilDestroyed
        } else {
            TimeLock::None
        }
    }
}

/// Delete-lock policy for locked records, set only at creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLockSpec {
    /// Unix timestamp (seconds) before which the record cannot be
    /// destroyed. Must be in the future at submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_at: Option<u64>,
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/notarizations/dynamic`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDynamicRequest {
    /// SHA-256 digest of the document (64 hex chars).
    pub content: String,
    #[serde(default)]
    pub metadata: Option<String>,
    /// Immutable description, set once at creation.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub transfer_lock: Option<TransferLockSpec>,
}

/// Body of `POST /api/notarizations/locked`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLockedRequest {
    /// SHA-256 digest of the document (64 hex chars).
    pub content: String,
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub delete_lock: Option<DeleteLockSpec>,
}

/// Body of `PUT /api/notarizations/{id}/state`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStateRequest {
    /// New SHA-256 digest (64 hex chars).
    pub content: String,
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Body of `PUT /api/notarizations/{id}/metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMetadataRequest {
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Body of `POST /api/notarizations/{id}/transfer`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_address: String,
}

/// Body of `POST /api/notarizations/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub notarization_id: String,
    /// SHA-256 digest the record is expected to hold (64 hex chars).
    pub expected_content: String,
}

// =============================================================================
// Responses
// =============================================================================

/// Response to the creation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub success: bool,
    pub notarization_id: String,
    pub transaction_digest: String,
    /// `"dynamic"` or `"locked"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// RFC 3339 submission timestamp.
    pub timestamp: String,
}

impl From<CreatedNotarization> for CreateResponse {
    fn from(created: CreatedNotarization) -> Self {
        Self {
            success: true,
            notarization_id: created.notarization_id,
            transaction_digest: created.tx_digest,
            kind: match created.method {
                NotarizationMethod::Dynamic => "dynamic".to_string(),
                NotarizationMethod::Locked => "locked".to_string(),
            },
            timestamp: created.timestamp.to_rfc3339(),
        }
    }
}

/// Response to mutations of an existing record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub success: bool,
    pub notarization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_address: Option<String>,
    pub transaction_digest: String,
    pub timestamp: String,
}

impl MutationResponse {
    pub fn new(notarization_id: impl Into<String>, mutation: Mutation) -> Self {
        Self {
            success: true,
            notarization_id: notarization_id.into(),
            recipient_address: None,
            transaction_digest: mutation.tx_digest,
            timestamp: mutation.timestamp.to_rfc3339(),
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient_address = Some(recipient.into());
        self
    }
}

/// Current state content of a record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StateView {
    pub content: String,
    pub metadata: String,
}

/// The three lock flags of a record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocksView {
    pub transfer_locked: bool,
    pub update_locked: bool,
    pub destroy_allowed: bool,
}

/// Response to `GET /api/notarizations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailsResponse {
    pub success: bool,
    pub notarization_id: String,
    pub state: StateView,
    pub version_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub method: NotarizationMethod,
    pub locks: LocksView,
}

/// Response to `POST /api/notarizations/verify`.
///
/// `success` refers to the verification request itself; `verified` is the
/// actual comparison outcome. A missing record is a successful request with
/// `verified: false` and an `error` message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub verified: bool,
    pub notarization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_content: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyResponse {
    pub fn from_outcome(
        notarization_id: impl Into<String>,
        expected_content: impl Into<String>,
        outcome: VerifyOutcome,
    ) -> Self {
        let expected = match outcome.error {
            // The soft-fail shape omits the expected content.
            Some(_) => None,
            None => Some(expected_content.into()),
        };
        Self {
            success: true,
            verified: outcome.verified,
            notarization_id: notarization_id.into(),
            expected_content: expected,
            actual_content: outcome.actual_content,
            matched: outcome.matched,
            error: outcome.error,
        }
    }
}

/// Response to `POST /api/notarizations/hash`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HashResponse {
    pub success: bool,
    /// SHA-256 digest of the uploaded file, lowercase hex.
    pub hash: String,
    pub algorithm: String,
    pub filename: String,
    pub size: usize,
}

/// Response to `GET /api/notarizations/wallet/info`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfoResponse {
    pub success: bool,
    pub address: String,
    /// Native token balance as the node reports it.
    pub balance: String,
    pub network: String,
    pub has_private_key: bool,
}

impl From<WalletInfo> for WalletInfoResponse {
    fn from(info: WalletInfo) -> Self {
        Self {
            success: true,
            address: info.address,
            balance: info.balance,
            network: info.network,
            has_private_key: info.has_private_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_lock_unlock_at_takes_precedence() {
        let spec = TransferLockSpec {
            unlock_at: Some(1_900_000_000),
            until_destroyed: Some(true),
        };
        assert_eq!(TimeLock::from(&spec), TimeLock::UnlockAt(1_900_000_000));

        let until = TransferLockSpec {
            unlock_at: None,
            until_destroyed: Some(true),
        };
        assert_eq!(TimeLock::from(&until), TimeLock::UntilDestroyed);

        let none = TransferLockSpec {
            unlock_at: None,
            until_destroyed: None,
        };
        assert_eq!(TimeLock::from(&none), TimeLock::None);
    }

    #[test]
    fn requests_parse_camel_case() {
        let request: CreateDynamicRequest = serde_json::from_str(
            r#"{"content":"abc","transferLock":{"untilDestroyed":true}}"#,
        )
        .unwrap();
        assert_eq!(request.content, "abc");
        assert!(request.metadata.is_none());
        assert_eq!(
            request.transfer_lock.unwrap().until_destroyed,
            Some(true)
        );

        let verify: VerifyRequest = serde_json::from_str(
            r#"{"notarizationId":"0xid","expectedContent":"00"}"#,
        )
        .unwrap();
        assert_eq!(verify.notarization_id, "0xid");
    }

    #[test]
    fn verify_response_soft_fail_omits_comparison_fields() {
        let outcome = VerifyOutcome {
            verified: false,
            matched: None,
            actual_content: None,
            error: Some("Notarization not found or inaccessible".into()),
        };
        let response = VerifyResponse::from_outcome("0xid", "aa", outcome);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["verified"], false);
        assert_eq!(json["error"], "Notarization not found or inaccessible");
        assert!(json.get("match").is_none());
        assert!(json.get("expectedContent").is_none());
    }

    #[test]
    fn verify_response_mismatch_keeps_both_values() {
        let outcome = VerifyOutcome {
            verified: false,
            matched: Some(false),
            actual_content: Some("bb".repeat(32)),
            error: None,
        };
        let response = VerifyResponse::from_outcome("0xid", "aa".repeat(32), outcome);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["match"], false);
        assert_eq!(json["expectedContent"], "aa".repeat(32));
        assert_eq!(json["actualContent"], "bb".repeat(32));
    }

    #[test]
    fn create_response_uses_wire_type_field() {
        let created = CreatedNotarization {
            notarization_id: "0xnew".into(),
            tx_digest: "D1".into(),
            method: NotarizationMethod::Locked,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(CreateResponse::from(created)).unwrap();
        assert_eq!(json["type"], "locked");
        assert_eq!(json["notarizationId"], "0xnew");
        assert_eq!(json["transactionDigest"], "D1");
    }
}
