use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::types::PendingAuthorization;

/// Reports that the callback server is up and whether it still waits for the redirect.
pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<PendingAuthorization>>>,
) -> Json<Value> {
    let pending = shared_state.lock().await;
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "awaiting_callback": pending.outcome.is_none(),
    }))
}
