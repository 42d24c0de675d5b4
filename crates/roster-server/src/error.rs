//! Error types for the employee API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Every variant maps to HTTP 500 with an `{error}` body; there is no 4xx
/// taxonomy on this surface.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Any failure from the backing store (connection, constraint, syntax,
    /// transaction abort). Not retried, not reinterpreted.
    #[error("store operation failed: {0}")]
    Store(#[from] tokio_postgres::Error),

    /// Failure checking a connection out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Missing or malformed required input, rejected before any store
    /// interaction.
    #[error("{0}")]
    Validation(String),
}

impl ServerError {
    /// Client-visible message. Store detail is logged, never echoed back.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::Store(_) | ServerError::Pool(_) => "Database error".to_string(),
            ServerError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::Store(e) => tracing::error!("store operation failed: {e}"),
            ServerError::Pool(e) => tracing::error!("connection pool error: {e}"),
            ServerError::Validation(msg) => tracing::warn!("rejected request: {msg}"),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.client_message() })),
        )
            .into_response()
    }
}
