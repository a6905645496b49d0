//! Data models
//!
//! Shared between the API server and its clients.
//! All IDs are UUID strings, timestamps are Unix milliseconds and money is
//! `rust_decimal::Decimal` (serialized as a JSON number).

pub mod customer;
pub mod dashboard;
pub mod product;
pub mod store_info;
pub mod transaction;
pub mod user;

// Re-exports
pub use customer::*;
pub use dashboard::*;
pub use product::*;
pub use store_info::*;
pub use transaction::*;
pub use user::*;
