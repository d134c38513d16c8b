// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::chain::ChainError;
use crate::service::ServiceError;

/// HTTP-level error. Every failure response carries the same JSON shape:
/// `{"success": false, "error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Policy(msg) => Self::unprocessable(msg),
            ServiceError::Chain(ChainError::Transport(msg)) => {
                Self::service_unavailable(format!("Network unavailable: {msg}"))
            }
            ServiceError::Chain(chain) => Self::internal(chain.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            success: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let unp = ApiError::unprocessable("locked");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);

        let unavailable = ApiError::service_unavailable("down");
        assert_eq!(unavailable.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn service_errors_map_to_distinct_statuses() {
        let validation: ApiError = ServiceError::Validation("bad digest".into()).into();
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);

        let policy: ApiError = ServiceError::Policy("record is locked".into()).into();
        assert_eq!(policy.status, StatusCode::UNPROCESSABLE_ENTITY);

        let transport: ApiError =
            ServiceError::Chain(ChainError::Transport("connection refused".into())).into();
        assert_eq!(transport.status, StatusCode::SERVICE_UNAVAILABLE);

        let rpc: ApiError = ServiceError::Chain(ChainError::Rpc {
            code: -32000,
            message: "object not found".into(),
        })
        .into();
        assert_eq!(rpc.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn into_response_returns_uniform_failure_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"success":false,"error":"bad data"}"#);
    }
}
