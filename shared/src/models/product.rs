//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Stock keeping unit, unique when present
    pub sku: Option<String>,
    pub name: String,
    pub category: Option<String>,
    /// Selling unit (pcs, kg, pack, ...)
    pub unit: String,
    /// Selling price
    pub price: Decimal,
    /// Purchase cost
    pub cost: Decimal,
    pub stock: i64,
    /// Low-stock threshold used by the dashboard
    pub min_stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub price: Decimal,
    pub cost: Option<Decimal>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub is_active: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub is_active: Option<bool>,
}

/// Product list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive match on name or SKU
    pub search: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(active) = self.active
            && product.is_active != active
        {
            return false;
        }
        if let Some(category) = self.category.as_deref()
            && !product
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product
                        .sku
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}
