/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - ServiceError / AuthError / JSON rejection を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::auth::AuthError;
use crate::services::error::ServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request timeout")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthenticated(message) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", message)
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
            AppError::Conflict(message) => (StatusCode::CONFLICT, "CONFLICT", message),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                "the request took too long to process".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { .. } | ServiceError::Reference { .. } => {
                AppError::NotFound(e.to_string())
            }
            ServiceError::Validation(message) => AppError::bad_request("BAD_REQUEST", message),
            ServiceError::Conflict { .. } => AppError::Conflict(e.to_string()),
            ServiceError::Timeout { .. } => AppError::Timeout,
            ServiceError::InvalidCredentials => AppError::Unauthenticated(e.to_string()),
            ServiceError::Hashing | ServiceError::Signing => AppError::Internal,
            ServiceError::Repo(err) => {
                error!(error = ?err, "Storage failure");
                AppError::Internal
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Unauthenticated(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("BAD_REQUEST", e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::error::RepoError;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn service_errors_map_to_status_and_code() {
        let cases = [
            (
                ServiceError::not_found("photo", "photo-999"),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ServiceError::Reference {
                    kind: "photo",
                    id: "photo-999".into(),
                },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ServiceError::validation("title is required"),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                ServiceError::Conflict { field: "email" },
                StatusCode::CONFLICT,
                "CONFLICT",
            ),
            (
                ServiceError::Timeout { operation: "get" },
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
            ),
            (
                ServiceError::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
            ),
            (
                ServiceError::Repo(RepoError::Db(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, body) = render(err.into()).await;
            assert_eq!(got_status, status);
            assert_eq!(body["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn not_found_message_is_passed_through() {
        let (_, body) = render(ServiceError::not_found("photo", "photo-999").into()).await;
        assert_eq!(
            body["error"]["message"],
            "photo with id photo-999 doesn't exist"
        );
    }

    #[tokio::test]
    async fn ownership_and_authentication_failures_differ_by_code() {
        let (status, body) = render(AppError::from(AuthError::Expired)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");

        let (status, body) = render(AppError::Unauthorized("nope".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}
