// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Notarization network integration.
//!
//! The network is the authoritative store for all record state. This module
//! provides:
//! - the [`NotarizationClient`] trait, the single seam between the service
//!   and the chain
//! - the JSON-RPC production implementation
//! - the shared record/lock/receipt types

pub mod client;
pub mod rpc;
pub mod types;

pub use client::NotarizationClient;
pub use rpc::RpcNotarizationClient;
pub use types::*;
