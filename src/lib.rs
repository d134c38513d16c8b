// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Floatly Notarization Backend
//!
//! HTTP service fronting the notarization network for the Floatly loan
//! marketplace. Documents are hashed client-side or via the upload
//! endpoint; the service creates and mutates on-chain notarization records,
//! enforcing the lifecycle policy (locked records are immutable and
//! non-transferable, destruction requires a positive allowance) before any
//! transaction is submitted. The chain is the only system of record.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `chain` - notarization network client (JSON-RPC) and record types
//! - `service` - notarization lifecycle policy
//! - `wallet` - process-lifetime Ed25519 signing key
//! - `hash` - SHA-256 digest helpers

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod hash;
pub mod models;
pub mod service;
pub mod state;
pub mod wallet;
