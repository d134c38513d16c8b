// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Domain types for on-chain notarization records.
//!
//! The chain is the system of record; everything here mirrors what the
//! network reports, no field is authoritative locally.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a notarization record was created.
///
/// `Dynamic` records permit state/metadata updates and transfer. `Locked`
/// records are immutable and non-transferable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum NotarizationMethod {
    Dynamic,
    Locked,
}

impl std::fmt::Display for NotarizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotarizationMethod::Dynamic => write!(f, "Dynamic"),
            NotarizationMethod::Locked => write!(f, "Locked"),
        }
    }
}

/// The versioned state of a record: content digest plus a metadata string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotarizationState {
    /// SHA-256 digest of the notarized document (64 hex chars).
    pub content: String,
    /// Caller-supplied metadata attached to this state version.
    pub metadata: String,
}

impl NotarizationState {
    pub fn new(content: impl Into<String>, metadata: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: metadata.into(),
        }
    }
}

/// Lock policy supplied at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLock {
    /// No lock.
    None,
    /// Locked until the given Unix timestamp (seconds).
    UnlockAt(u64),
    /// Locked until the record is destroyed.
    UntilDestroyed,
}

/// Full fan-out read of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotarizationDetails {
    pub state: NotarizationState,
    pub version_count: u64,
    /// Immutable description set at creation, if any.
    pub description: Option<String>,
    /// Updatable record-level metadata, if any.
    pub updatable_metadata: Option<String>,
    /// Creation time, Unix seconds.
    pub created_at: u64,
    pub method: NotarizationMethod,
    pub transfer_locked: bool,
    pub update_locked: bool,
    pub destroy_allowed: bool,
}

/// Receipt for a creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReceipt {
    /// Id of the newly created record.
    pub notarization_id: String,
    /// Digest of the submitted transaction.
    pub tx_digest: String,
}

/// Receipt for a mutation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Digest of the submitted transaction.
    pub tx_digest: String,
}

/// Errors from the chain boundary.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// Network-level failure reaching the fullnode.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error. The message text is passed
    /// through unchanged.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    /// The node answered but the payload did not have the expected shape.
    #[error("unexpected response from node: {0}")]
    Decode(String),

    /// The configured endpoint could not be parsed.
    #[error("invalid network endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_matches_wire_names() {
        assert_eq!(NotarizationMethod::Dynamic.to_string(), "Dynamic");
        assert_eq!(NotarizationMethod::Locked.to_string(), "Locked");
    }

    #[test]
    fn method_serializes_as_bare_string() {
        assert_eq!(
            serde_json::to_string(&NotarizationMethod::Locked).unwrap(),
            r#""Locked""#
        );
        let parsed: NotarizationMethod = serde_json::from_str(r#""Dynamic""#).unwrap();
        assert_eq!(parsed, NotarizationMethod::Dynamic);
    }

    #[test]
    fn rpc_error_message_passes_through() {
        let err = ChainError::Rpc {
            code: -32602,
            message: "object not found".into(),
        };
        assert_eq!(err.to_string(), "object not found");
    }
}
