use thiserror::Error;

/// Failures talking to the panel backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("client setup error: {0}")]
    Setup(String),
}

impl ClientError {
    /// Label used for metrics and structured logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "network",
            ClientError::Status { .. } => "status",
            ClientError::Decode(_) => "decode",
            ClientError::Setup(_) => "setup",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
