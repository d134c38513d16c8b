// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! JSON-RPC implementation of the chain boundary.
//!
//! Transaction construction, gas handling, and consensus all live on the
//! node side; this client only ships signed call payloads and reads record
//! fields back. One `reqwest` client is created per process and reused.

use std::sync::Arc;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::wallet::Wallet;

use super::client::NotarizationClient;
use super::types::{
    ChainError, CreateReceipt, NotarizationMethod, NotarizationState, TimeLock, TxReceipt,
};

/// Production chain client speaking JSON-RPC 2.0 to a fullnode.
pub struct RpcNotarizationClient {
    http: reqwest::Client,
    endpoint: Url,
    package_id: String,
    wallet: Arc<Wallet>,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Result of an executed notarization transaction.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteView {
    /// Set for creation calls; absent for mutations of existing records.
    notarization_id: Option<String>,
    digest: String,
}

#[derive(Deserialize)]
struct StateView {
    data: String,
    #[serde(default)]
    metadata: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceView {
    total_balance: String,
}

impl RpcNotarizationClient {
    pub fn new(
        endpoint: &str,
        package_id: impl Into<String>,
        wallet: Arc<Wallet>,
    ) -> Result<Self, ChainError> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidEndpoint(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            package_id: package_id.into(),
            wallet,
        })
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, ChainError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let body: RpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ChainError::Decode(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        body.result
            .ok_or_else(|| ChainError::Decode("missing result field".into()))
    }

    /// Submit one signed notarization call.
    ///
    /// The canonical JSON payload is signed with the wallet key; the node
    /// verifies the signature and builds the actual transaction.
    async fn execute(&self, call: &str, args: Value) -> Result<ExecuteView, ChainError> {
        let payload = json!({
            "packageId": self.package_id,
            "call": call,
            "args": args,
        });
        let canonical =
            serde_json::to_vec(&payload).map_err(|e| ChainError::Decode(e.to_string()))?;
        let signature = self.wallet.sign(&canonical);

        let params = json!([{
            "payload": payload,
            "sender": self.wallet.address(),
            "publicKey": Base64::encode_string(&self.wallet.public_key_bytes()),
            "signature": Base64::encode_string(&signature.to_bytes()),
        }]);
        self.call("notarization_execute", params).await
    }

    fn read_params(&self, id: &str) -> Value {
        json!([self.package_id, id])
    }
}

/// Wire shape of a lock policy, as the node expects it.
fn time_lock_json(lock: TimeLock) -> Value {
    match lock {
        TimeLock::None => json!({ "none": true }),
        TimeLock::UnlockAt(ts) => json!({ "unlockAt": ts }),
        TimeLock::UntilDestroyed => json!({ "untilDestroyed": true }),
    }
}

#[async_trait]
impl NotarizationClient for RpcNotarizationClient {
    async fn create_dynamic(
        &self,
        state: NotarizationState,
        description: Option<String>,
        transfer_lock: TimeLock,
    ) -> Result<CreateReceipt, ChainError> {
        let result = self
            .execute(
                "createDynamic",
                json!({
                    "state": { "data": state.content, "metadata": state.metadata },
                    "description": description,
                    "transferLock": time_lock_json(transfer_lock),
                }),
            )
            .await?;
        into_create_receipt(result)
    }

    async fn create_locked(
        &self,
        state: NotarizationState,
        description: Option<String>,
        delete_lock: TimeLock,
    ) -> Result<CreateReceipt, ChainError> {
        let result = self
            .execute(
                "createLocked",
                json!({
                    "state": { "data": state.content, "metadata": state.metadata },
                    "description": description,
                    "deleteLock": time_lock_json(delete_lock),
                }),
            )
            .await?;
        into_create_receipt(result)
    }

    async fn update_state(
        &self,
        id: &str,
        state: NotarizationState,
    ) -> Result<TxReceipt, ChainError> {
        let result = self
            .execute(
                "updateState",
                json!({
                    "notarizationId": id,
                    "state": { "data": state.content, "metadata": state.metadata },
                }),
            )
            .await?;
        Ok(TxReceipt {
            tx_digest: result.digest,
        })
    }

    async fn update_metadata(
        &self,
        id: &str,
        metadata: Option<String>,
    ) -> Result<TxReceipt, ChainError> {
        let result = self
            .execute(
                "updateMetadata",
                json!({ "notarizationId": id, "metadata": metadata }),
            )
            .await?;
        Ok(TxReceipt {
            tx_digest: result.digest,
        })
    }

    async fn transfer(&self, id: &str, recipient: &str) -> Result<TxReceipt, ChainError> {
        let result = self
            .execute(
                "transfer",
                json!({ "notarizationId": id, "recipient": recipient }),
            )
            .await?;
        Ok(TxReceipt {
            tx_digest: result.digest,
        })
    }

    async fn destroy(&self, id: &str) -> Result<TxReceipt, ChainError> {
        let result = self
            .execute("destroy", json!({ "notarizationId": id }))
            .await?;
        Ok(TxReceipt {
            tx_digest: result.digest,
        })
    }

    async fn state(&self, id: &str) -> Result<NotarizationState, ChainError> {
        let view: StateView = self.call("notarization_state", self.read_params(id)).await?;
        Ok(NotarizationState {
            content: view.data,
            metadata: view.metadata.unwrap_or_default(),
        })
    }

    async fn state_version_count(&self, id: &str) -> Result<u64, ChainError> {
        self.call("notarization_stateVersionCount", self.read_params(id))
            .await
    }

    async fn description(&self, id: &str) -> Result<Option<String>, ChainError> {
        self.call("notarization_description", self.read_params(id))
            .await
    }

    async fn updatable_metadata(&self, id: &str) -> Result<Option<String>, ChainError> {
        self.call("notarization_updatableMetadata", self.read_params(id))
            .await
    }

    async fn created_at(&self, id: &str) -> Result<u64, ChainError> {
        self.call("notarization_createdAtTs", self.read_params(id))
            .await
    }

    async fn method(&self, id: &str) -> Result<NotarizationMethod, ChainError> {
        let raw: String = self.call("notarization_method", self.read_params(id)).await?;
        match raw.as_str() {
            "Dynamic" => Ok(NotarizationMethod::Dynamic),
            "Locked" => Ok(NotarizationMethod::Locked),
            other => Err(ChainError::Decode(format!(
                "unknown notarization method: {other}"
            ))),
        }
    }

    async fn is_transfer_locked(&self, id: &str) -> Result<bool, ChainError> {
        self.call("notarization_isTransferLocked", self.read_params(id))
            .await
    }

    async fn is_update_locked(&self, id: &str) -> Result<bool, ChainError> {
        self.call("notarization_isUpdateLocked", self.read_params(id))
            .await
    }

    async fn is_destroy_allowed(&self, id: &str) -> Result<bool, ChainError> {
        self.call("notarization_isDestroyAllowed", self.read_params(id))
            .await
    }

    async fn balance(&self, address: &str) -> Result<String, ChainError> {
        let view: BalanceView = self.call("iotax_getBalance", json!([address])).await?;
        Ok(view.total_balance)
    }
}

fn into_create_receipt(result: ExecuteView) -> Result<CreateReceipt, ChainError> {
    let notarization_id = result
        .notarization_id
        .ok_or_else(|| ChainError::Decode("creation result missing notarization id".into()))?;
    Ok(CreateReceipt {
        notarization_id,
        tx_digest: result.digest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let wallet = Arc::new(Wallet::generate());
        let result = RpcNotarizationClient::new("not a url", "0xpkg", wallet);
        assert!(matches!(result, Err(ChainError::InvalidEndpoint(_))));
    }

    #[test]
    fn time_lock_wire_shapes() {
        assert_eq!(time_lock_json(TimeLock::None), json!({ "none": true }));
        assert_eq!(
            time_lock_json(TimeLock::UnlockAt(1_900_000_000)),
            json!({ "unlockAt": 1_900_000_000u64 })
        );
        assert_eq!(
            time_lock_json(TimeLock::UntilDestroyed),
            json!({ "untilDestroyed": true })
        );
    }

    #[test]
    fn rpc_error_takes_precedence_over_missing_result() {
        let body: RpcResponse<u64> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"object not found"}}"#,
        )
        .unwrap();
        assert!(body.result.is_none());
        let err = body.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "object not found");
    }

    #[test]
    fn execute_view_parses_creation_result() {
        let view: ExecuteView =
            serde_json::from_str(r#"{"notarizationId":"0xabc","digest":"D1"}"#).unwrap();
        let receipt = into_create_receipt(view).unwrap();
        assert_eq!(receipt.notarization_id, "0xabc");
        assert_eq!(receipt.tx_digest, "D1");
    }

    #[test]
    fn mutation_result_without_id_is_not_a_creation() {
        let view: ExecuteView = serde_json::from_str(r#"{"digest":"D2"}"#).unwrap();
        assert!(into_create_receipt(view).is_err());
    }
}
