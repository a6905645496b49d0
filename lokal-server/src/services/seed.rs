//! Default catalog for a fresh store

use rust_decimal::Decimal;
use shared::models::{CustomerCreate, ProductCreate};

/// Name of the catch-all customer used for anonymous credit sales
pub const WALK_IN_CUSTOMER: &str = "Pelanggan Umum";

/// (sku, name, category, unit, price, cost, stock, min_stock)
const CATALOG: &[(&str, &str, &str, &str, i64, i64, i64, i64)] = &[
    ("BRS-5KG", "Beras Premium 5kg", "Sembako", "karung", 78_000, 70_000, 20, 5),
    ("GLP-1KG", "Gula Pasir 1kg", "Sembako", "pcs", 17_500, 15_500, 30, 10),
    ("MYK-2L", "Minyak Goreng 2L", "Sembako", "pcs", 36_000, 32_000, 24, 6),
    ("TLR-10", "Telur Ayam 1kg", "Sembako", "kg", 29_000, 26_000, 15, 5),
    ("IDM-GRG", "Indomie Goreng", "Makanan", "pcs", 3_500, 2_900, 120, 40),
    ("KPI-SCH", "Kopi Sachet", "Minuman", "pcs", 1_500, 1_100, 200, 50),
    ("TEH-BTL", "Teh Botol 450ml", "Minuman", "pcs", 5_000, 3_900, 48, 12),
    ("AQA-600", "Air Mineral 600ml", "Minuman", "pcs", 4_000, 2_800, 48, 12),
    ("SBN-MND", "Sabun Mandi", "Kebutuhan Rumah", "pcs", 4_500, 3_600, 36, 10),
    ("DTJ-800", "Deterjen 800g", "Kebutuhan Rumah", "pcs", 22_000, 19_000, 12, 4),
];

pub fn default_catalog() -> Vec<ProductCreate> {
    CATALOG
        .iter()
        .map(
            |&(sku, name, category, unit, price, cost, stock, min_stock)| ProductCreate {
                sku: Some(sku.to_string()),
                name: name.to_string(),
                category: Some(category.to_string()),
                unit: Some(unit.to_string()),
                price: Decimal::from(price),
                cost: Some(Decimal::from(cost)),
                stock: Some(stock),
                min_stock: Some(min_stock),
                is_active: Some(true),
            },
        )
        .collect()
}

pub fn walk_in_customer() -> CustomerCreate {
    CustomerCreate {
        name: WALK_IN_CUSTOMER.to_string(),
        phone: None,
        email: None,
        address: None,
        receivables: None,
    }
}
