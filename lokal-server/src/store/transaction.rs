//! Transaction Repository

use shared::models::{PaymentMethod, Transaction, TransactionCreate, TransactionQuery};
use shared::util::{new_id, now_millis};
use shared::{AppError, ErrorCode};

use super::{Entity, MemoryStore, StoreError, StoreResult, clean};
use crate::services::sales;
use crate::utils::validation::out_of_range;

#[derive(Clone)]
pub struct TransactionRepository {
    store: MemoryStore,
}

impl TransactionRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Filtered list, newest first
    pub async fn find_filtered(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let tables = self.store.read().await;
        Ok(tables
            .transactions
            .iter()
            .rev()
            .filter(|t| query.matches(t))
            .cloned()
            .collect())
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Transaction>> {
        let tables = self.store.read().await;
        Ok(tables.transactions.iter().find(|t| t.id == id).cloned())
    }

    /// Record a sale.
    ///
    /// Every check (customer, prices, stock, payment) runs before the first
    /// mutation, all under one write guard: either stock, receivables and the
    /// transaction log all change, or nothing does.
    pub async fn create(&self, cashier_id: &str, input: TransactionCreate) -> StoreResult<Transaction> {
        let method = PaymentMethod::parse(&input.payment_method).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                format!(
                    "payment_method must be one of cash, transfer, qris, credit (got '{}')",
                    input.payment_method
                ),
            )
        })?;
        let customer_id = clean(input.customer_id);
        let notes = clean(input.notes);

        let mut tables = self.store.write().await;

        let customer_name = match customer_id.as_deref() {
            Some(id) => Some(
                tables
                    .customers
                    .get(id)
                    .map(|c| c.name.clone())
                    .ok_or_else(|| StoreError::NotFound(Entity::Customer, id.to_string()))?,
            ),
            None => None,
        };

        let priced = sales::price_items(&tables.products, &input.items)?;
        let settlement = sales::settle(
            method,
            priced.total,
            input.paid_amount,
            customer_name.is_some(),
        )?;

        let mut receivables = None;
        if !settlement.receivable.is_zero()
            && let Some(customer) = customer_id.as_deref().and_then(|id| tables.customers.get(id))
        {
            let balance = customer
                .receivables
                .checked_add(settlement.receivable)
                .ok_or_else(|| out_of_range("receivables"))?;
            receivables = Some(balance);
        }

        // ── All checks passed: apply ──
        let now = now_millis();
        for item in &priced.items {
            if let Some(product) = tables.products.get_mut(&item.product_id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }

        if let Some(balance) = receivables
            && let Some(id) = customer_id.as_deref()
            && let Some(customer) = tables.customers.get_mut(id)
        {
            customer.receivables = balance;
            customer.updated_at = now;
        }

        let day = sales::invoice_day(now);
        let sequence = {
            let seq = tables.invoice_sequences.entry(day.clone()).or_insert(0);
            *seq += 1;
            *seq
        };

        let transaction = Transaction {
            id: new_id(),
            invoice_number: sales::invoice_number(&day, sequence),
            customer_id,
            customer_name,
            items: priced.items,
            total: priced.total,
            payment_method: method,
            paid_amount: settlement.paid,
            change_amount: settlement.change,
            receivable_amount: settlement.receivable,
            notes,
            cashier_id: cashier_id.to_string(),
            created_at: now,
        };
        tables.transactions.push(transaction.clone());
        Ok(transaction)
    }
}
