//! Store Module
//!
//! In-memory tables behind one async `RwLock`, with a repository per entity.
//! Multi-entity writes (a sale touching stock and receivables) happen under a
//! single write guard, so they are all-or-nothing.

pub mod customer;
pub mod product;
pub mod setup;
pub mod transaction;
pub mod user;

pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use setup::SetupRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use shared::models::{Customer, Product, Transaction, User};
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Entity kinds, used in not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Product,
    Customer,
    Transaction,
}

impl Entity {
    fn not_found_code(self) -> ErrorCode {
        match self {
            Entity::User => ErrorCode::NotFound,
            Entity::Product => ErrorCode::ProductNotFound,
            Entity::Customer => ErrorCode::CustomerNotFound,
            Entity::Transaction => ErrorCode::TransactionNotFound,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "User",
            Entity::Product => "Product",
            Entity::Customer => "Customer",
            Entity::Transaction => "Transaction",
        };
        f.write_str(name)
    }
}

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} {1} not found")]
    NotFound(Entity, String),

    #[error("SKU '{0}' is already in use")]
    SkuExists(String),

    #[error("Email '{0}' is already registered")]
    EmailExists(String),

    /// Business rule rejected the write; nothing was changed
    #[error(transparent)]
    Rejected(#[from] AppError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::NotFound(entity, id) => {
                AppError::with_message(entity.not_found_code(), message).with_detail("id", id)
            }
            StoreError::SkuExists(sku) => {
                AppError::with_message(ErrorCode::ProductSkuExists, message).with_detail("sku", sku)
            }
            StoreError::EmailExists(email) => {
                AppError::with_message(ErrorCode::EmailAlreadyRegistered, message)
                    .with_detail("email", email)
            }
            StoreError::Rejected(app) => app,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// All tables
#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<String, User>,
    pub products: HashMap<String, Product>,
    pub customers: HashMap<String, Customer>,
    /// Insertion order (oldest first)
    pub transactions: Vec<Transaction>,
    /// `YYYYMMDD` -> last invoice sequence issued that day
    pub invoice_sequences: HashMap<String, u32>,
    /// When setup/initialize first seeded the catalog (Unix millis)
    pub initialized_at: Option<i64>,
}

impl Tables {
    pub fn sku_in_use(&self, sku: &str, except_id: Option<&str>) -> bool {
        self.products.values().any(|p| {
            Some(p.id.as_str()) != except_id
                && p.sku.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(sku))
        })
    }
}

/// Shared handle to the in-memory tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }
}

/// Trim and drop empty optional text
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_to_app_error() {
        let err: AppError = StoreError::NotFound(Entity::Product, "p-9".into()).into();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.message, "Product p-9 not found");

        let err: AppError = StoreError::SkuExists("IDM-1".into()).into();
        assert_eq!(err.code, ErrorCode::ProductSkuExists);

        let err: AppError = StoreError::EmailExists("a@b.c".into()).into();
        assert_eq!(err.code, ErrorCode::EmailAlreadyRegistered);

        let err: AppError =
            StoreError::Rejected(AppError::new(ErrorCode::ProductOutOfStock)).into();
        assert_eq!(err.code, ErrorCode::ProductOutOfStock);
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean(Some("  x ".into())), Some("x".into()));
        assert_eq!(clean(Some("   ".into())), None);
        assert_eq!(clean(None), None);
    }
}
