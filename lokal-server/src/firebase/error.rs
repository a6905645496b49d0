use thiserror::Error;

/// Realtime database / credential errors
#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("{0} is not set")]
    NotConfigured(&'static str),

    #[error("invalid service account: {0}")]
    Credentials(String),

    #[error("failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
