//! Sale pricing and payment settlement
//!
//! Pure functions over a snapshot of the product table. The transaction
//! repository runs them under its write guard, then applies the result.

use std::collections::HashMap;

use chrono::DateTime;
use rust_decimal::Decimal;
use shared::models::{PaymentMethod, Product, TransactionItem, TransactionItemInput};
use shared::{AppError, AppResult, ErrorCode};

use crate::utils::validation::out_of_range;

/// Priced line items
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSale {
    pub items: Vec<TransactionItem>,
    pub total: Decimal,
}

/// How the total is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub paid: Decimal,
    pub change: Decimal,
    /// Unpaid remainder booked onto the customer (credit only)
    pub receivable: Decimal,
}

/// Price every line from current product prices and check stock for all of
/// them. Quantities of repeated products are summed before the stock check.
pub fn price_items(
    products: &HashMap<String, Product>,
    lines: &[TransactionItemInput],
) -> AppResult<PricedSale> {
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::TransactionEmpty));
    }

    let mut demand: HashMap<&str, i64> = HashMap::new();
    let mut items = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;

    for line in lines {
        if line.quantity <= 0 {
            return Err(AppError::new(ErrorCode::TransactionInvalidQuantity)
                .with_detail("product_id", line.product_id.clone())
                .with_detail("quantity", line.quantity));
        }

        let product = products.get(&line.product_id).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", line.product_id),
            )
            .with_detail("product_id", line.product_id.clone())
        })?;

        if !product.is_active {
            return Err(AppError::with_message(
                ErrorCode::ProductInactive,
                format!("{} is not available for sale", product.name),
            )
            .with_detail("product_id", product.id.clone()));
        }

        let requested = demand.entry(product.id.as_str()).or_insert(0);
        *requested = requested
            .checked_add(line.quantity)
            .ok_or_else(|| out_of_range("quantity"))?;
        if *requested > product.stock {
            return Err(AppError::with_message(
                ErrorCode::ProductOutOfStock,
                format!("Insufficient stock for {}", product.name),
            )
            .with_detail("product_id", product.id.clone())
            .with_detail("available", product.stock)
            .with_detail("requested", *requested));
        }

        let subtotal = product
            .price
            .checked_mul(Decimal::from(line.quantity))
            .ok_or_else(|| out_of_range("subtotal"))?;
        total = total
            .checked_add(subtotal)
            .ok_or_else(|| out_of_range("total"))?;
        items.push(TransactionItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            sku: product.sku.clone(),
            quantity: line.quantity,
            unit_price: product.price,
            subtotal,
        });
    }

    Ok(PricedSale { items, total })
}

/// Work out paid / change / receivable for a payment method.
///
/// Non-credit sales must be paid in full (a missing amount means exact
/// payment). Credit sales need a customer; whatever is not paid up front is
/// added to their receivables.
pub fn settle(
    method: PaymentMethod,
    total: Decimal,
    paid_amount: Option<Decimal>,
    has_customer: bool,
) -> AppResult<Settlement> {
    if let Some(paid) = paid_amount
        && paid < Decimal::ZERO
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "paid_amount must not be negative",
        ));
    }

    match method {
        PaymentMethod::Credit => {
            if !has_customer {
                return Err(AppError::new(ErrorCode::CreditRequiresCustomer));
            }
            let paid = paid_amount.unwrap_or(Decimal::ZERO);
            Ok(Settlement {
                paid,
                change: (paid - total).max(Decimal::ZERO),
                receivable: (total - paid).max(Decimal::ZERO),
            })
        }
        _ => {
            let paid = paid_amount.unwrap_or(total);
            if paid < total {
                return Err(AppError::new(ErrorCode::PaymentInsufficientAmount)
                    .with_detail("total", total.to_string())
                    .with_detail("paid_amount", paid.to_string()));
            }
            Ok(Settlement {
                paid,
                change: paid - total,
                receivable: Decimal::ZERO,
            })
        }
    }
}

/// `YYYYMMDD` (UTC) for an invoice day
pub fn invoice_day(created_at_millis: i64) -> String {
    DateTime::from_timestamp_millis(created_at_millis)
        .unwrap_or_default()
        .format("%Y%m%d")
        .to_string()
}

/// `INV-YYYYMMDD-NNNN`
pub fn invoice_number(day: &str, sequence: u32) -> String {
    format!("INV-{day}-{sequence:04}")
}
