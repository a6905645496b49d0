//! Product routes: list / create / show / update / destroy

use axum::extract::{Path, Query, State};
use http::StatusCode;
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate};

use super::payload::Payload;
use crate::core::ServerState;
use crate::store::{Entity, ProductRepository, StoreError};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_count,
    validate_optional_text, validate_required_text,
};
use crate::{ApiResponse, AppResult, ErrorCode};

/// GET /products, /products.php
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = ProductRepository::new(state.store.clone())
        .find_filtered(&query)
        .await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/{id}
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let product = ProductRepository::new(state.store.clone())
        .find_by_id(&id)
        .await?
        .ok_or(StoreError::NotFound(Entity::Product, id))?;
    Ok(ApiResponse::success(product))
}

/// POST /products
pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<ProductCreate>,
) -> AppResult<(StatusCode, ApiResponse<Product>)> {
    validate_create(&payload)?;
    let product = ProductRepository::new(state.store.clone())
        .create(payload)
        .await?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Product created", product),
    ))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Payload(payload): Payload<ProductUpdate>,
) -> AppResult<ApiResponse<Product>> {
    validate_update(&payload)?;
    let product = ProductRepository::new(state.store.clone())
        .update(&id, payload)
        .await?;
    Ok(ApiResponse::success_with_message("Product updated", product))
}

/// DELETE /products/{id}
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let removed = ProductRepository::new(state.store.clone())
        .delete(&id)
        .await?;
    if !removed {
        return Err(StoreError::NotFound(Entity::Product, id).into());
    }
    tracing::info!(product_id = %id, "Product deleted");
    Ok(ApiResponse::message("Product deleted"))
}

fn validate_create(p: &ProductCreate) -> AppResult<()> {
    validate_required_text(&p.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&p.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&p.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&p.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_amount(p.price, "price", ErrorCode::ProductInvalidPrice)?;
    if let Some(cost) = p.cost {
        validate_amount(cost, "cost", ErrorCode::ProductInvalidPrice)?;
    }
    if let Some(stock) = p.stock {
        validate_count(stock, "stock")?;
    }
    if let Some(min_stock) = p.min_stock {
        validate_count(min_stock, "min_stock")?;
    }
    Ok(())
}

fn validate_update(p: &ProductUpdate) -> AppResult<()> {
    if let Some(name) = &p.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&p.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&p.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&p.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    if let Some(price) = p.price {
        validate_amount(price, "price", ErrorCode::ProductInvalidPrice)?;
    }
    if let Some(cost) = p.cost {
        validate_amount(cost, "cost", ErrorCode::ProductInvalidPrice)?;
    }
    if let Some(stock) = p.stock {
        validate_count(stock, "stock")?;
    }
    if let Some(min_stock) = p.min_stock {
        validate_count(min_stock, "min_stock")?;
    }
    Ok(())
}
