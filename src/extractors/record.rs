//! Extract a [`Record`] from a JSON request body. Rejections become 400 (413 for oversized bodies) with the standard error body.

use crate::error::AppError;
use crate::record::Record;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// Extractor for a JSON object body. Rejects bad JSON, non-objects and non-JSON content types.
#[derive(Clone, Debug)]
pub struct RecordBody(pub Record);

#[async_trait]
impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(rejection.body_text())
                } else {
                    AppError::BadRequest(rejection.body_text())
                }
            })?;
        Record::try_from(value).map(RecordBody)
    }
}
