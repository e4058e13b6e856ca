use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use service::errors::ClientError;

/// Errors surfaced by console handlers.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        warn!(error = %msg, "console request rejected");
        (StatusCode::BAD_REQUEST, msg).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend client: {0}")]
    Client(#[from] ClientError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
