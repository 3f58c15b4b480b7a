//! Typed errors and HTTP mapping.

use crate::record::RecordId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
    #[error("missing required variable: {0}")]
    Missing(&'static str),
    #[error("seed load: {0}")]
    Seed(String),
}

/// Failures raised by a [`RecordStore`](crate::store::RecordStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record must carry an integer 'id' field")]
    MissingId,
    #[error("record with id {0} already exists")]
    Duplicate(RecordId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Store(e) => match e {
                StoreError::MissingId => (StatusCode::BAD_REQUEST, "bad_request"),
                StoreError::Duplicate(_) => (StatusCode::CONFLICT, "conflict"),
                StoreError::Unavailable(_) | StoreError::Db(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_or_server_status() {
        let cases = [
            (AppError::from(StoreError::MissingId), StatusCode::BAD_REQUEST),
            (AppError::from(StoreError::Duplicate(7)), StatusCode::CONFLICT),
            (
                AppError::from(StoreError::Unavailable("lock poisoned".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(StoreError::Db(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_and_code().0, expected, "{}", err);
        }
    }

    #[test]
    fn duplicate_message_names_the_id() {
        let err = AppError::from(StoreError::Duplicate(42));
        assert_eq!(err.to_string(), "record with id 42 already exists");
    }
}
