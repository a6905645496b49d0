//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] - unified error types (from `shared::error`)
//! - logging setup
//! - input validation helpers

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
