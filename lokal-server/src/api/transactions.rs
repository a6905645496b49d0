//! Transaction routes: list / create / show

use axum::extract::{Path, Query, State};
use http::StatusCode;
use shared::models::{Transaction, TransactionCreate, TransactionQuery};

use super::payload::Payload;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::{Entity, StoreError, TransactionRepository};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::{ApiResponse, AppResult};

/// GET /transactions
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    let transactions = TransactionRepository::new(state.store.clone())
        .find_filtered(&query)
        .await?;
    Ok(ApiResponse::success(transactions))
}

/// GET /transactions/{id}
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Transaction>> {
    let transaction = TransactionRepository::new(state.store.clone())
        .find_by_id(&id)
        .await?
        .ok_or(StoreError::NotFound(Entity::Transaction, id))?;
    Ok(ApiResponse::success(transaction))
}

/// POST /transactions
///
/// The cashier is the authenticated user.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Payload(payload): Payload<TransactionCreate>,
) -> AppResult<(StatusCode, ApiResponse<Transaction>)> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let transaction = TransactionRepository::new(state.store.clone())
        .create(&user.id, payload)
        .await?;
    tracing::info!(
        invoice = %transaction.invoice_number,
        total = %transaction.total,
        method = transaction.payment_method.as_str(),
        cashier_id = %user.id,
        "Transaction recorded"
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Transaction created", transaction),
    ))
}
