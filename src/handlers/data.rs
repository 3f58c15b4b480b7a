//! Record collection handlers: list, create, update, delete.

use crate::error::AppError;
use crate::extractors::RecordBody;
use crate::record::RecordId;
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

fn parse_id(id_str: &str) -> Result<RecordId, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// GET /data
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let records = state.store.list_all().await?;
    Ok((axum::http::StatusCode::OK, Json(records)))
}

/// POST /data/p
pub async fn create(
    State(state): State<AppState>,
    RecordBody(record): RecordBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let record = state.store.create(record).await?;
    tracing::info!(id = record.id(), "record created");
    Ok(response::created(record))
}

/// PUT /data/:id — replaces the stored record and echoes the body as sent. A differing body `id` moves the record (409 if taken).
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    RecordBody(record): RecordBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.replace(id, record.clone()).await? {
        return Err(AppError::NotFound(format!("record {}", id)));
    }
    tracing::info!(id, new_id = record.id(), "record replaced");
    Ok(response::updated(id, record))
}

/// DELETE /data/:id — idempotent; a missing id still answers 200.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if state.store.remove(id).await? {
        tracing::info!(id, "record removed");
    } else {
        tracing::debug!(id, "delete of absent record");
    }
    Ok(response::deleted(id))
}
