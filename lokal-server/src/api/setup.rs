//! Setup routes: status and first-run seeding

use axum::extract::State;
use serde::Deserialize;

use super::payload::Payload;
use crate::core::ServerState;
use crate::store::SetupRepository;
use crate::store::setup::{SeedReport, SetupStatus};
use crate::{ApiResponse, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct InitializeRequest {
    /// Re-run seeding on an initialized store (adds missing SKUs only)
    #[serde(default)]
    pub force: bool,
}

/// GET /setup/status
pub async fn status(State(state): State<ServerState>) -> AppResult<ApiResponse<SetupStatus>> {
    let status = SetupRepository::new(state.store.clone()).status().await?;
    Ok(ApiResponse::success(status))
}

/// POST /setup/initialize
pub async fn initialize(
    State(state): State<ServerState>,
    Payload(req): Payload<InitializeRequest>,
) -> AppResult<ApiResponse<SeedReport>> {
    let report = SetupRepository::new(state.store.clone())
        .initialize(req.force)
        .await?;
    tracing::info!(
        force = req.force,
        products_created = report.products_created,
        products_skipped = report.products_skipped,
        "Store initialized"
    );
    Ok(ApiResponse::success_with_message("Store initialized", report))
}
