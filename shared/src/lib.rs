//! Shared types for the MarketLokal backend
//!
//! Common types used across crates including error types, response
//! structures, and the domain models exchanged over the API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
