//! Customer Repository

use rust_decimal::Decimal;
use shared::models::{Customer, CustomerCreate, CustomerQuery, ReceivableOperation, ReceivableUpdate};
use shared::util::{new_id, now_millis};
use shared::{AppError, ErrorCode};

use super::{Entity, MemoryStore, StoreError, StoreResult, clean};
use crate::utils::validation::out_of_range;

#[derive(Clone)]
pub struct CustomerRepository {
    store: MemoryStore,
}

impl CustomerRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Filtered list, sorted by name (case-insensitive)
    pub async fn find_filtered(&self, query: &CustomerQuery) -> StoreResult<Vec<Customer>> {
        let tables = self.store.read().await;
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        customers.sort_by_cached_key(|c| (c.name.to_lowercase(), c.id.clone()));
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Customer>> {
        Ok(self.store.read().await.customers.get(id).cloned())
    }

    pub async fn create(&self, data: CustomerCreate) -> StoreResult<Customer> {
        let now = now_millis();
        let customer = Customer {
            id: new_id(),
            name: data.name.trim().to_string(),
            phone: clean(data.phone),
            email: clean(data.email),
            address: clean(data.address),
            receivables: data.receivables.unwrap_or(Decimal::ZERO),
            created_at: now,
            updated_at: now,
        };
        self.store
            .write()
            .await
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    /// Apply a receivables change; the balance never goes below zero.
    pub async fn update_receivables(
        &self,
        id: &str,
        update: &ReceivableUpdate,
    ) -> StoreResult<Customer> {
        let mut tables = self.store.write().await;
        let customer = tables
            .customers
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(Entity::Customer, id.to_string()))?;

        customer.receivables = apply_receivable(customer.receivables, update)?;
        customer.updated_at = now_millis();
        Ok(customer.clone())
    }
}

/// New balance after `update`, or the reason it is rejected
pub fn apply_receivable(balance: Decimal, update: &ReceivableUpdate) -> Result<Decimal, AppError> {
    let amount = update.amount;
    match update.operation {
        ReceivableOperation::Set => {
            if amount < Decimal::ZERO {
                return Err(AppError::with_message(
                    ErrorCode::ReceivableInvalidAmount,
                    "amount must not be negative",
                ));
            }
            Ok(amount)
        }
        ReceivableOperation::Add | ReceivableOperation::Pay if amount <= Decimal::ZERO => {
            Err(AppError::with_message(
                ErrorCode::ReceivableInvalidAmount,
                "amount must be greater than zero",
            ))
        }
        ReceivableOperation::Add => balance
            .checked_add(amount)
            .ok_or_else(|| out_of_range("receivables")),
        ReceivableOperation::Pay => {
            if amount > balance {
                return Err(AppError::new(ErrorCode::ReceivableExceedsBalance)
                    .with_detail("balance", balance.to_string())
                    .with_detail("amount", amount.to_string()));
            }
            Ok(balance - amount)
        }
    }
}
