//! Auth routes
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /login | POST | public, rate limited |
//! | /register | POST | public, rate limited |
//! | /user | GET | authenticated (placeholder) |
//! | /logout | POST | authenticated |
//! | /check-auth | GET | authenticated |
//!
//! The `perform_*` functions are the operations themselves; the legacy
//! `auth.php` adapter calls them too.

use axum::{Json, extract::State};
use http::StatusCode;
use serde_json::{Value, json};
use shared::models::{AuthStatus, LoginRequest, LoginResponse, RegisterRequest};

use super::payload::{Payload, from_value};
use crate::auth::{ClientIp, CurrentUser};
use crate::core::ServerState;
use crate::security_log;
use crate::services;
use crate::{ApiResponse, AppError, AppResult, ErrorCode};

const RATE_WINDOW_SECS: u64 = 60;
const USER_PLACEHOLDER: &str = "User endpoint - auth middleware to be implemented";

/// POST /login
pub async fn login(
    State(state): State<ServerState>,
    ip: ClientIp,
    Payload(body): Payload<Value>,
) -> AppResult<ApiResponse<LoginResponse>> {
    perform_login(&state, &ip, body).await
}

/// POST /register
pub async fn register(
    State(state): State<ServerState>,
    ip: ClientIp,
    Payload(body): Payload<Value>,
) -> AppResult<(StatusCode, ApiResponse<LoginResponse>)> {
    throttle(&state, "register", &ip, state.config.register_rate_limit).await?;
    let req: RegisterRequest = from_value(body)?;
    let session = services::auth::register(&state, req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Registration successful", session),
    ))
}

/// GET /user
pub async fn user() -> Json<Value> {
    Json(json!({ "message": USER_PLACEHOLDER }))
}

/// POST /logout
pub async fn logout(State(state): State<ServerState>, user: CurrentUser) -> ApiResponse<()> {
    perform_logout(&state, &user)
}

/// GET /check-auth
pub async fn check(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<AuthStatus>> {
    perform_check(&state, &user).await
}

pub(crate) async fn perform_login(
    state: &ServerState,
    ip: &ClientIp,
    body: Value,
) -> AppResult<ApiResponse<LoginResponse>> {
    throttle(state, "login", ip, state.config.login_rate_limit).await?;
    let req: LoginRequest = from_value(body)?;
    let session = services::auth::login(state, req).await?;
    Ok(ApiResponse::success_with_message("Login successful", session))
}

pub(crate) fn perform_logout(state: &ServerState, user: &CurrentUser) -> ApiResponse<()> {
    services::auth::logout(state, user);
    ApiResponse::message("Logged out successfully")
}

pub(crate) async fn perform_check(
    state: &ServerState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<AuthStatus>> {
    let status = services::auth::check(state, user).await?;
    Ok(ApiResponse::success(status))
}

async fn throttle(
    state: &ServerState,
    route: &'static str,
    ip: &ClientIp,
    limit: u32,
) -> AppResult<()> {
    if state.rate_limiter.check(route, &ip.0, limit, RATE_WINDOW_SECS).await {
        return Ok(());
    }
    security_log!("WARN", "rate_limited", route = route, ip = ip.0.clone());
    Err(AppError::with_message(
        ErrorCode::TooManyRequests,
        "Too many attempts, please try again later",
    ))
}
