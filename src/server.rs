use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, types::PendingAuthorization};

/// Serves the OAuth redirect target on an already bound listener.
///
/// Runs until the task driving it is aborted.
pub async fn start_callback_server(
    listener: TcpListener,
    state: Arc<Mutex<PendingAuthorization>>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state));

    axum::serve(listener, app).await?;
    Ok(())
}
