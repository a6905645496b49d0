//! Setup Repository
//!
//! Status and first-run seeding of the catalog.

use serde::Serialize;
use shared::models::{Customer, Product};
use shared::util::{new_id, now_millis};
use shared::{AppError, ErrorCode};

use super::{MemoryStore, StoreResult};
use crate::services::seed;

/// Whether the store has been seeded, plus table sizes
#[derive(Debug, Clone, Serialize)]
pub struct SetupStatus {
    pub initialized: bool,
    pub initialized_at: Option<i64>,
    pub users: usize,
    pub products: usize,
    pub customers: usize,
    pub transactions: usize,
}

/// What an initialize call created
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub products_created: usize,
    pub products_skipped: usize,
    pub customers_created: usize,
}

#[derive(Clone)]
pub struct SetupRepository {
    store: MemoryStore,
}

impl SetupRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub async fn status(&self) -> StoreResult<SetupStatus> {
        let tables = self.store.read().await;
        Ok(SetupStatus {
            initialized: tables.initialized_at.is_some(),
            initialized_at: tables.initialized_at,
            users: tables.users.len(),
            products: tables.products.len(),
            customers: tables.customers.len(),
            transactions: tables.transactions.len(),
        })
    }

    /// Seed the default catalog and the walk-in customer.
    ///
    /// A second call fails with `AlreadyInitialized` unless `force` is set;
    /// forced runs only add catalog SKUs that are missing.
    pub async fn initialize(&self, force: bool) -> StoreResult<SeedReport> {
        let mut tables = self.store.write().await;
        if tables.initialized_at.is_some() && !force {
            return Err(AppError::new(ErrorCode::AlreadyInitialized).into());
        }

        let now = now_millis();
        let mut report = SeedReport::default();

        for item in seed::default_catalog() {
            let sku = item.sku.clone().unwrap_or_default();
            if tables.sku_in_use(&sku, None) {
                report.products_skipped += 1;
                continue;
            }
            let product = Product {
                id: new_id(),
                sku: item.sku,
                name: item.name,
                category: item.category,
                unit: item.unit.unwrap_or_else(|| "pcs".to_string()),
                price: item.price,
                cost: item.cost.unwrap_or_default(),
                stock: item.stock.unwrap_or(0),
                min_stock: item.min_stock.unwrap_or(0),
                is_active: item.is_active.unwrap_or(true),
                created_at: now,
                updated_at: now,
            };
            tables.products.insert(product.id.clone(), product);
            report.products_created += 1;
        }

        let has_walk_in = tables
            .customers
            .values()
            .any(|c| c.name == seed::WALK_IN_CUSTOMER);
        if !has_walk_in {
            let walk_in = seed::walk_in_customer();
            let customer = Customer {
                id: new_id(),
                name: walk_in.name,
                phone: walk_in.phone,
                email: walk_in.email,
                address: walk_in.address,
                receivables: walk_in.receivables.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            };
            tables.customers.insert(customer.id.clone(), customer);
            report.customers_created += 1;
        }

        tables.initialized_at.get_or_insert(now);
        Ok(report)
    }
}
