// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Floatly

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateDynamicRequest, CreateLockedRequest, CreateResponse, DeleteLockSpec,
        DetailsResponse, HashResponse, LocksView, MutationResponse, StateView,
        TransferLockSpec, TransferRequest, UpdateMetadataRequest, UpdateStateRequest,
        VerifyRequest, VerifyResponse, WalletInfoResponse,
    },
    state::AppState,
};

pub mod hash;
pub mod health;
pub mod notarizations;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    let notarization_routes = Router::new()
        // System routes first; parameterized routes last so they cannot
        // shadow them.
        .route("/health", get(health::health))
        .route("/wallet/info", get(wallet::wallet_info))
        .route(
            "/hash",
            post(hash::hash_file).layer(DefaultBodyLimit::max(hash::MAX_UPLOAD_BYTES)),
        )
        .route("/dynamic", post(notarizations::create_dynamic))
        .route("/locked", post(notarizations::create_locked))
        .route("/verify", post(notarizations::verify))
        .route(
            "/{notarization_id}/state",
            put(notarizations::update_state),
        )
        .route(
            "/{notarization_id}/metadata",
            put(notarizations::update_metadata),
        )
        .route(
            "/{notarization_id}/transfer",
            post(notarizations::transfer),
        )
        .route(
            "/{notarization_id}",
            get(notarizations::get_details).delete(notarizations::destroy),
        )
        .with_state(state);

    Router::new()
        .route("/", get(index))
        .nest("/api/notarizations", notarization_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// Service index: name, version, endpoint catalogue.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Floatly Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": {
            "notarization": "Notarization for loan documents",
        },
        "endpoints": {
            "health": "GET /api/notarizations/health",
            "walletInfo": "GET /api/notarizations/wallet/info",
            "createHash": "POST /api/notarizations/hash (multipart/form-data, field: file)",
            "createDynamic": "POST /api/notarizations/dynamic",
            "createLocked": "POST /api/notarizations/locked",
            "updateState": "PUT /api/notarizations/{id}/state",
            "updateMetadata": "PUT /api/notarizations/{id}/metadata",
            "transfer": "POST /api/notarizations/{id}/transfer",
            "destroy": "DELETE /api/notarizations/{id}",
            "getDetails": "GET /api/notarizations/{id}",
            "verify": "POST /api/notarizations/verify",
        },
        "documentation": "GET /docs",
    }))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        wallet::wallet_info,
        hash::hash_file,
        notarizations::create_dynamic,
        notarizations::create_locked,
        notarizations::update_state,
        notarizations::update_metadata,
        notarizations::transfer,
        notarizations::destroy,
        notarizations::get_details,
        notarizations::verify
    ),
    components(
        schemas(
            CreateDynamicRequest,
            CreateLockedRequest,
            TransferLockSpec,
            DeleteLockSpec,
            UpdateStateRequest,
            UpdateMetadataRequest,
            TransferRequest,
            VerifyRequest,
            CreateResponse,
            MutationResponse,
            DetailsResponse,
            StateView,
            LocksView,
            VerifyResponse,
            HashResponse,
            WalletInfoResponse,
            health::HealthResponse,
            health::HealthWallet
        )
    ),
    tags(
        (name = "System", description = "Health and wallet"),
        (name = "Notarizations", description = "Notarization lifecycle")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::hash::sha256_hex;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::from_config(Config::default()))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let _ = app().into_make_service();
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Floatly Backend API");
        assert_eq!(json["endpoints"]["verify"], "POST /api/notarizations/verify");
    }

    #[tokio::test]
    async fn create_dynamic_rejects_short_content() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/dynamic")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"content":"abc"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("SHA-256"));
    }

    #[tokio::test]
    async fn create_dynamic_rejects_missing_content() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/dynamic")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"metadata":"m"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn unconfigured_subsystem_answers_503_for_valid_requests() {
        let content = "ab".repeat(32);
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/dynamic")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(r#"{{"content":"{content}"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("NOTARIZATION_PKG_ID"));
    }

    #[tokio::test]
    async fn verify_rejects_malformed_expected_content() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/verify")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"notarizationId":"0xid","expectedContent":"zz"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_is_degraded_without_package_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/notarizations/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "degraded");
    }

    #[tokio::test]
    async fn hash_endpoint_hashes_uploaded_file() {
        let boundary = "xyzboundary";
        let content = b"loan agreement bytes";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"loan.pdf\"\r\nContent-Type: application/pdf\r\n\r\n{}\r\n--{boundary}--\r\n",
            String::from_utf8_lossy(content)
        );

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/hash")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["hash"], sha256_hex(content));
        assert_eq!(json["algorithm"], "sha256");
        assert_eq!(json["filename"], "loan.pdf");
        assert_eq!(json["size"], content.len());
    }

    #[tokio::test]
    async fn hash_endpoint_requires_file_field() {
        let boundary = "xyzboundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\ndata\r\n--{boundary}--\r\n"
        );

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notarizations/hash")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }
}
