// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

//! Notarization lifecycle endpoints.
//!
//! Handlers validate input shape (digest format, required fields) and hand
//! off to the policy service. Digest validation always happens before the
//! service is touched, so malformed requests cost no chain reads.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::{
    chain::{NotarizationState, TimeLock},
    error::ApiError,
    hash::is_valid_sha256_hex,
    models::{
        CreateDynamicRequest, CreateLockedRequest, CreateResponse, DetailsResponse, LocksView,
        MutationResponse, StateView, TransferRequest, UpdateMetadataRequest, UpdateStateRequest,
        VerifyRequest, VerifyResponse,
    },
    state::AppState,
};

/// Unwrap a JSON body, turning axum's rejection into a 400 in the uniform
/// failure shape.
fn parse<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn require_digest(value: &str, field: &str) -> Result<(), ApiError> {
    if !is_valid_sha256_hex(value) {
        return Err(ApiError::bad_request(format!(
            "{field} must be a valid SHA-256 hash (64 hex characters)"
        )));
    }
    Ok(())
}

/// Create a dynamic (updatable, transferable) notarization record.
#[utoipa::path(
    post,
    path = "/api/notarizations/dynamic",
    tag = "Notarizations",
    request_body = CreateDynamicRequest,
    responses(
        (status = 200, description = "Record created", body = CreateResponse),
        (status = 400, description = "Malformed content digest"),
        (status = 503, description = "Notarization subsystem not configured")
    )
)]
pub async fn create_dynamic(
    State(state): State<AppState>,
    body: Result<Json<CreateDynamicRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let request = parse(body)?;
    require_digest(&request.content, "content")?;
    let service = state.service()?;

    let transfer_lock = request
        .transfer_lock
        .as_ref()
        .map(TimeLock::from)
        .unwrap_or(TimeLock::None);

    let created = service
        .create_dynamic(
            NotarizationState::new(request.content, request.metadata.unwrap_or_default()),
            request.description,
            transfer_lock,
        )
        .await?;

    Ok(Json(created.into()))
}

/// Create a locked (immutable, non-transferable) notarization record.
#[utoipa::path(
    post,
    path = "/api/notarizations/locked",
    tag = "Notarizations",
    request_body = CreateLockedRequest,
    responses(
        (status = 200, description = "Record created", body = CreateResponse),
        (status = 400, description = "Malformed content digest or past-dated delete lock"),
        (status = 503, description = "Notarization subsystem not configured")
    )
)]
pub async fn create_locked(
    State(state): State<AppState>,
    body: Result<Json<CreateLockedRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let request = parse(body)?;
    require_digest(&request.content, "content")?;
    let service = state.service()?;

    let created = service
        .create_locked(
            NotarizationState::new(request.content, request.metadata.unwrap_or_default()),
            request.description,
            request.delete_lock.and_then(|lock| lock.unlock_at),
        )
        .await?;

    Ok(Json(created.into()))
}

/// Replace the state of a dynamic record.
#[utoipa::path(
    put,
    path = "/api/notarizations/{notarization_id}/state",
    tag = "Notarizations",
    params(("notarization_id" = String, Path, description = "Record id")),
    request_body = UpdateStateRequest,
    responses(
        (status = 200, description = "State updated", body = MutationResponse),
        (status = 400, description = "Malformed content digest"),
        (status = 422, description = "Record is locked")
    )
)]
pub async fn update_state(
    State(state): State<AppState>,
    Path(notarization_id): Path<String>,
    body: Result<Json<UpdateStateRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let request = parse(body)?;
    require_digest(&request.content, "content")?;
    let service = state.service()?;

    let mutation = service
        .update_state(
            &notarization_id,
            NotarizationState::new(request.content, request.metadata.unwrap_or_default()),
        )
        .await?;

    Ok(Json(MutationResponse::new(notarization_id, mutation)))
}

/// Replace the updatable metadata of a dynamic record.
#[utoipa::path(
    put,
    path = "/api/notarizations/{notarization_id}/metadata",
    tag = "Notarizations",
    params(("notarization_id" = String, Path, description = "Record id")),
    request_body = UpdateMetadataRequest,
    responses(
        (status = 200, description = "Metadata updated", body = MutationResponse),
        (status = 422, description = "Record is locked")
    )
)]
pub async fn update_metadata(
    State(state): State<AppState>,
    Path(notarization_id): Path<String>,
    body: Result<Json<UpdateMetadataRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let request = parse(body)?;
    let service = state.service()?;

    let mutation = service
        .update_metadata(&notarization_id, request.metadata)
        .await?;

    Ok(Json(MutationResponse::new(notarization_id, mutation)))
}

/// Transfer a dynamic record to another address.
#[utoipa::path(
    post,
    path = "/api/notarizations/{notarization_id}/transfer",
    tag = "Notarizations",
    params(("notarization_id" = String, Path, description = "Record id")),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Record transferred", body = MutationResponse),
        (status = 400, description = "Missing recipient address"),
        (status = 422, description = "Record is locked")
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    Path(notarization_id): Path<String>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let request = parse(body)?;
    if request.recipient_address.is_empty() {
        return Err(ApiError::bad_request("recipientAddress is required"));
    }
    let service = state.service()?;

    let mutation = service
        .transfer(&notarization_id, &request.recipient_address)
        .await?;

    Ok(Json(
        MutationResponse::new(notarization_id, mutation)
            .with_recipient(request.recipient_address),
    ))
}

/// Destroy a record, if its lock state allows it.
#[utoipa::path(
    delete,
    path = "/api/notarizations/{notarization_id}",
    tag = "Notarizations",
    params(("notarization_id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record destroyed", body = MutationResponse),
        (status = 422, description = "Destruction not allowed")
    )
)]
pub async fn destroy(
    State(state): State<AppState>,
    Path(notarization_id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let service = state.service()?;
    let mutation = service.destroy(&notarization_id).await?;
    Ok(Json(MutationResponse::new(notarization_id, mutation)))
}

/// Read the full record: state, version count, description, metadata,
/// creation time, method, and lock flags.
#[utoipa::path(
    get,
    path = "/api/notarizations/{notarization_id}",
    tag = "Notarizations",
    params(("notarization_id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record details", body = DetailsResponse),
        (status = 500, description = "Record unreadable")
    )
)]
pub async fn get_details(
    State(state): State<AppState>,
    Path(notarization_id): Path<String>,
) -> Result<Json<DetailsResponse>, ApiError> {
    let service = state.service()?;
    let details = service.details(&notarization_id).await?;

    let created_at = chrono::DateTime::from_timestamp(details.created_at as i64, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| details.created_at.to_string());

    Ok(Json(DetailsResponse {
        success: true,
        notarization_id,
        state: StateView {
            content: details.state.content,
            metadata: details.state.metadata,
        },
        version_count: details.version_count,
        description: details.description,
        metadata: details.updatable_metadata,
        created_at,
        method: details.method,
        locks: LocksView {
            transfer_locked: details.transfer_locked,
            update_locked: details.update_locked,
            destroy_allowed: details.destroy_allowed,
        },
    }))
}

/// Compare a record's stored content against an expected digest.
///
/// Soft-fails on a missing record: the response is 200 with
/// `verified: false` and an error message.
#[utoipa::path(
    post,
    path = "/api/notarizations/verify",
    tag = "Notarizations",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyResponse),
        (status = 400, description = "Malformed expected content digest")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let request = parse(body)?;
    require_digest(&request.expected_content, "expectedContent")?;
    let service = state.service()?;

    let outcome = service
        .verify(&request.notarization_id, &request.expected_content)
        .await;

    Ok(Json(VerifyResponse::from_outcome(
        request.notarization_id,
        request.expected_content,
        outcome,
    )))
}
