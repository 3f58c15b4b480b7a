//! Record collection routes.

use crate::handlers::data::{create, delete as delete_handler, list, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, routing::put, Router};

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/data", get(list))
        .route("/data/p", post(create))
        .route("/data/:id", put(update).delete(delete_handler))
        .with_state(state)
}
