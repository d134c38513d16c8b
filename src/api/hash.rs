// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! File hashing endpoint for the document upload flow.
//!
//! Clients hash their loan documents here and then notarize the returned
//! digest; raw document bytes never reach the chain.

use axum::{extract::Multipart, Json};

use crate::{error::ApiError, hash::sha256_hex, models::HashResponse};

/// Upload size cap, applied as the request body limit on this route.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Hash an uploaded file (multipart field `file`, ≤ 10 MB).
#[utoipa::path(
    post,
    path = "/api/notarizations/hash",
    tag = "Notarizations",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "SHA-256 digest of the upload", body = HashResponse),
        (status = 400, description = "Missing file field or oversized upload")
    )
)]
pub async fn hash_file(mut multipart: Multipart) -> Result<Json<HashResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read file field: {e}")))?;

        return Ok(Json(HashResponse {
            success: true,
            hash: sha256_hex(&bytes),
            algorithm: "sha256".to_string(),
            filename,
            size: bytes.len(),
        }));
    }

    Err(ApiError::bad_request(
        "file is required (as multipart/form-data)",
    ))
}
