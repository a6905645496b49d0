//! Dashboard summary

use rust_decimal::Decimal;
use shared::models::DashboardSummary;
use shared::AppResult;
use shared::util::day_start_millis;

use crate::store::Tables;
use crate::utils::validation::out_of_range;

/// How many recent transactions the summary carries
pub const RECENT_TRANSACTIONS: usize = 5;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Sum money values, failing instead of overflowing
fn checked_sum(field: &str, values: impl IntoIterator<Item = Decimal>) -> AppResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |sum, v| {
        sum.checked_add(v).ok_or_else(|| out_of_range(field))
    })
}

/// Compute the summary from one consistent snapshot of the tables.
/// "Today" is the UTC day containing `now_millis`.
pub fn summarize(tables: &Tables, now_millis: i64) -> AppResult<DashboardSummary> {
    let today_start = day_start_millis(now_millis);
    let today_end = today_start + DAY_MS;

    let mut low_stock_products: Vec<_> = tables
        .products
        .values()
        .filter(|p| p.is_active && p.is_low_stock())
        .cloned()
        .collect();
    low_stock_products.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));

    let today: Vec<_> = tables
        .transactions
        .iter()
        .filter(|t| t.created_at >= today_start && t.created_at < today_end)
        .collect();

    Ok(DashboardSummary {
        total_products: tables.products.len(),
        active_products: tables.products.values().filter(|p| p.is_active).count(),
        low_stock_count: low_stock_products.len(),
        low_stock_products,
        total_customers: tables.customers.len(),
        total_receivables: checked_sum(
            "total_receivables",
            tables.customers.values().map(|c| c.receivables),
        )?,
        today_transactions: today.len(),
        today_revenue: checked_sum("today_revenue", today.iter().map(|t| t.total))?,
        total_revenue: checked_sum("total_revenue", tables.transactions.iter().map(|t| t.total))?,
        recent_transactions: tables
            .transactions
            .iter()
            .rev()
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect(),
        generated_at: now_millis,
    })
}
