//! Customer routes: list / create / show / receivables

use axum::extract::{Path, Query, State};
use http::StatusCode;
use shared::models::{Customer, CustomerCreate, CustomerQuery, ReceivableUpdate};

use super::payload::Payload;
use crate::core::ServerState;
use crate::store::{CustomerRepository, Entity, StoreError};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount,
    validate_email, validate_optional_text, validate_required_text,
};
use crate::{ApiResponse, AppResult, ErrorCode};

/// GET /customers
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<ApiResponse<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.store.clone())
        .find_filtered(&query)
        .await?;
    Ok(ApiResponse::success(customers))
}

/// GET /customers/{id}
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = CustomerRepository::new(state.store.clone())
        .find_by_id(&id)
        .await?
        .ok_or(StoreError::NotFound(Entity::Customer, id))?;
    Ok(ApiResponse::success(customer))
}

/// POST /customers
pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<CustomerCreate>,
) -> AppResult<(StatusCode, ApiResponse<Customer>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    if let Some(email) = payload.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email)?;
    }
    if let Some(receivables) = payload.receivables {
        validate_amount(receivables, "receivables", ErrorCode::ReceivableInvalidAmount)?;
    }

    let customer = CustomerRepository::new(state.store.clone())
        .create(payload)
        .await?;
    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Customer created", customer),
    ))
}

/// PUT /customers/{id}/receivables
pub async fn update_receivables(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Payload(payload): Payload<ReceivableUpdate>,
) -> AppResult<ApiResponse<Customer>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    validate_amount(payload.amount, "amount", ErrorCode::ReceivableInvalidAmount)?;
    let customer = CustomerRepository::new(state.store.clone())
        .update_receivables(&id, &payload)
        .await?;
    tracing::info!(
        customer_id = %customer.id,
        operation = ?payload.operation,
        amount = %payload.amount,
        balance = %customer.receivables,
        "Receivables updated"
    );
    Ok(ApiResponse::success_with_message("Receivables updated", customer))
}
