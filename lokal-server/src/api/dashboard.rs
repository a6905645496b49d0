//! Dashboard route (`/dashboard` and its legacy `.php` aliases)

use axum::extract::State;
use shared::models::DashboardSummary;
use shared::util::now_millis;

use crate::core::ServerState;
use crate::services::dashboard::summarize;
use crate::{ApiResponse, AppResult};

/// GET /dashboard, /dashboard.php, /legacy/dashboard.php
pub async fn summary(State(state): State<ServerState>) -> AppResult<ApiResponse<DashboardSummary>> {
    let tables = state.store.read().await;
    Ok(ApiResponse::success(summarize(&tables, now_millis())?))
}
