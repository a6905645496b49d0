//! Customer Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Outstanding credit (kasbon) balance, never negative
    pub receivables: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub receivables: Option<Decimal>,
}

/// How a receivables update is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivableOperation {
    /// Add to the outstanding balance
    Add,
    /// Customer pays off part of the balance
    Pay,
    /// Overwrite the balance
    Set,
}

/// Update receivables payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivableUpdate {
    pub amount: Decimal,
    pub operation: ReceivableOperation,
    pub note: Option<String>,
}

/// Customer list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerQuery {
    /// Case-insensitive match on name or phone
    pub search: Option<String>,
}

impl CustomerQuery {
    pub fn matches(&self, customer: &Customer) -> bool {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                customer.name.to_lowercase().contains(&term)
                    || customer.phone.as_deref().is_some_and(|p| p.contains(&term))
            }
            _ => true,
        }
    }
}
