/*
 * Responsibility
 * - アプリ共通の AppError 定義 (エラー正規化の唯一の場所)
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - repo / validation / token エラーを統一的に変換
 *
 * 方針
 * - kind → status の対応はここにしか書かない
 *   (resolver の 401 も handler の 400 も全て同じ変換を通す)
 * - wire format は {"error": "<message>"} の flat な形で固定
 * - エラーは変換時にちょうど一度だけログする
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    // Malformed create/update payload.
    #[error("{0}")]
    Validation(String),
    // Token failed to decode (signature, structure, expiry).
    #[error("{0}")]
    Token(String),
    // Authenticated-path refusals ("token invalid", "invalid user").
    #[error("{0}")]
    Unauthorized(String),
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    // Unclassified. The message is not leaked to the client.
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn token(message: impl Into<String>) -> Self {
        Self::Token(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Single log point for every request error.
        tracing::error!(error = %self, "request failed");

        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Token(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = ErrorResponse { error: message };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::validation("username must be unique"),
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /blogs/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::validation("invalid id")
            }
            // These indicate server-side config / programming errors
            _ => AppError::Internal,
        }
    }
}
