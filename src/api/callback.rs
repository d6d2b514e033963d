use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{types::PendingAuthorization, warning};

/// Receives Spotify's redirect and hands the outcome to the waiting provider.
///
/// Only the first callback with a matching `state` counts; later hits leave
/// the recorded outcome untouched.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<PendingAuthorization>>>,
) -> Html<&'static str> {
    let mut pending = shared_state.lock().await;
    if pending.outcome.is_some() {
        return Html("<h4>Authorization already completed.</h4>");
    }

    if params.get("state") != Some(&pending.expected_state) {
        warning!("Ignoring callback with unexpected state parameter");
        return Html("<h4>State mismatch, request ignored.</h4>");
    }

    if let Some(error) = params.get("error") {
        pending.outcome = Some(Err(format!("authorization denied: {}", error)));
        return Html("<h4>Authorization denied.</h4>");
    }

    match params.get("code") {
        Some(code) => {
            pending.outcome = Some(Ok(code.clone()));
            Html("<h2>Authorization successful.</h2><p>Close this browser window.</p>")
        }
        None => {
            pending.outcome = Some(Err("callback carried no code".to_string()));
            Html("<h4>Missing authorization code.</h4>")
        }
    }
}
