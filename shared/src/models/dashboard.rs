//! Dashboard summary

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, Transaction};

/// Back-office overview returned by the dashboard routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_count: usize,
    /// Active products at or below their `min_stock`, lowest stock first
    pub low_stock_products: Vec<Product>,
    pub total_customers: usize,
    pub total_receivables: Decimal,
    pub today_transactions: usize,
    pub today_revenue: Decimal,
    pub total_revenue: Decimal,
    pub recent_transactions: Vec<Transaction>,
    /// Generation time (Unix millis)
    pub generated_at: i64,
}
