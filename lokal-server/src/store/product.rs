//! Product Repository

use rust_decimal::Decimal;
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate};
use shared::util::{new_id, now_millis};

use super::{Entity, MemoryStore, StoreError, StoreResult, clean};

/// Default selling unit
const DEFAULT_UNIT: &str = "pcs";

#[derive(Clone)]
pub struct ProductRepository {
    store: MemoryStore,
}

impl ProductRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Filtered list, sorted by name (case-insensitive)
    pub async fn find_filtered(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        let tables = self.store.read().await;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        products.sort_by_cached_key(|p| (p.name.to_lowercase(), p.id.clone()));
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.store.read().await.products.get(id).cloned())
    }

    pub async fn create(&self, data: ProductCreate) -> StoreResult<Product> {
        let sku = clean(data.sku);
        let mut tables = self.store.write().await;

        if let Some(sku) = sku.as_deref()
            && tables.sku_in_use(sku, None)
        {
            return Err(StoreError::SkuExists(sku.to_string()));
        }

        let now = now_millis();
        let product = Product {
            id: new_id(),
            sku,
            name: data.name.trim().to_string(),
            category: clean(data.category),
            unit: clean(data.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            price: data.price,
            cost: data.cost.unwrap_or(Decimal::ZERO),
            stock: data.stock.unwrap_or(0),
            min_stock: data.min_stock.unwrap_or(0),
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> StoreResult<Product> {
        let mut tables = self.store.write().await;
        if !tables.products.contains_key(id) {
            return Err(StoreError::NotFound(Entity::Product, id.to_string()));
        }

        // An explicit empty SKU clears it
        let sku = data.sku.map(|s| clean(Some(s)));
        if let Some(Some(sku)) = sku.as_ref()
            && tables.sku_in_use(sku, Some(id))
        {
            return Err(StoreError::SkuExists(sku.clone()));
        }

        let product = tables
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(Entity::Product, id.to_string()))?;

        if let Some(sku) = sku {
            product.sku = sku;
        }
        if let Some(name) = data.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = data.category {
            product.category = clean(Some(category));
        }
        if let Some(unit) = clean(data.unit) {
            product.unit = unit;
        }
        if let Some(price) = data.price {
            product.price = price;
        }
        if let Some(cost) = data.cost {
            product.cost = cost;
        }
        if let Some(stock) = data.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = data.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(is_active) = data.is_active {
            product.is_active = is_active;
        }
        product.updated_at = now_millis();
        Ok(product.clone())
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.store.write().await.products.remove(id).is_some())
    }
}
