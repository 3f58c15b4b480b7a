//! Response envelope helpers: `{message, data}` for writes, `{message}` for deletes.

use crate::record::RecordId;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const CREATED_MESSAGE: &str = "Data received successfully";

pub fn updated_message(id: RecordId) -> String {
    format!("Data with id {} updated successfully", id)
}

pub fn deleted_message(id: RecordId) -> String {
    format!("Data with id {} deleted successfully", id)
}

#[derive(Serialize)]
pub struct MessageWithData<T> {
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<MessageWithData<T>>) {
    (
        StatusCode::CREATED,
        Json(MessageWithData {
            message: CREATED_MESSAGE.to_string(),
            data,
        }),
    )
}

pub fn updated<T: Serialize>(id: RecordId, data: T) -> (StatusCode, Json<MessageWithData<T>>) {
    (
        StatusCode::OK,
        Json(MessageWithData {
            message: updated_message(id),
            data,
        }),
    )
}

pub fn deleted(id: RecordId) -> (StatusCode, Json<Message>) {
    (
        StatusCode::OK,
        Json(Message {
            message: deleted_message(id),
        }),
    )
}
