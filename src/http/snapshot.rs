//! Serves the built snapshot artifact.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET {snapshot.route}: the last snapshot written by `widget-cli build-snapshot`.
pub async fn serve_snapshot(State(state): State<AppState>) -> Result<Response, ApiError> {
    match tokio::fs::read(&state.snapshot_path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = ?state.snapshot_path, "Snapshot requested but not built");
            Err(ApiError::NotFound("Snapshot not built".into()))
        }
        Err(e) => Err(ApiError::Internal(format!("failed to read snapshot: {e}"))),
    }
}
