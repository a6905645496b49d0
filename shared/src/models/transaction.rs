//! Transaction Model (sales)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Qris,
    /// Unpaid remainder goes onto the customer's receivables
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Qris => "qris",
            Self::Credit => "credit",
        }
    }

    /// Parse a client-supplied method, case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            "qris" => Some(Self::Qris),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// Line item snapshot (name and price are frozen at sale time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub product_id: String,
    pub product_name: String,
    pub sku: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Transaction entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// `INV-YYYYMMDD-NNNN`
    pub invoice_number: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub items: Vec<TransactionItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub paid_amount: Decimal,
    pub change_amount: Decimal,
    /// Amount added to the customer's receivables (credit sales)
    pub receivable_amount: Decimal,
    pub notes: Option<String>,
    /// User who rang up the sale
    pub cashier_id: String,
    pub created_at: i64,
}

/// Line item input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItemInput {
    pub product_id: String,
    pub quantity: i64,
}

/// Create transaction payload
///
/// `payment_method` stays a string so unknown methods surface as a
/// dedicated payment error instead of a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    #[serde(default)]
    pub items: Vec<TransactionItemInput>,
    pub customer_id: Option<String>,
    pub payment_method: String,
    pub paid_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Transaction list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Inclusive lower bound (Unix millis)
    pub from: Option<i64>,
    /// Inclusive upper bound (Unix millis)
    pub to: Option<i64>,
    pub customer_id: Option<String>,
}

impl TransactionQuery {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.from.is_some_and(|from| tx.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.created_at > to) {
            return false;
        }
        match self.customer_id.as_deref() {
            Some(id) if !id.is_empty() => tx.customer_id.as_deref() == Some(id),
            _ => true,
        }
    }
}
