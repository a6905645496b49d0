use thiserror::Error;

use crate::routing::RouteTableError;

/// Errors raised while configuring or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for server-level operations
pub type Result<T> = std::result::Result<T, ServerError>;
