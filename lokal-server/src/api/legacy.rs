//! Legacy `auth.php` adapter
//!
//! Resolves the `action` discriminator, then hands off to the same operation
//! functions the REST routes use.

use std::collections::HashMap;

use axum::extract::{OriginalUri, Query, State};
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Method};
use serde_json::Value;

use super::auth::{perform_check, perform_login, perform_logout};
use super::payload::Payload;
use crate::auth::{ClientIp, authenticate};
use crate::core::ServerState;
use crate::routing::LegacyAction;

/// GET|POST /auth.php, /legacy/auth.php
pub async fn auth_php(
    State(state): State<ServerState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ip: ClientIp,
    Query(query): Query<HashMap<String, String>>,
    Payload(body): Payload<Value>,
) -> Response {
    let body_action = body.get("action");
    let query_action = query.get("action").map(String::as_str);
    let action = LegacyAction::resolve(method == Method::POST, body_action, query_action);
    tracing::debug!(action = action.as_str(), "Legacy auth dispatch");

    match action {
        LegacyAction::Login => perform_login(&state, &ip, body).await.into_response(),
        LegacyAction::Logout => match authenticate(&headers, &uri, &state) {
            Ok(user) => perform_logout(&state, &user).into_response(),
            Err(e) => e.into_response(),
        },
        LegacyAction::Check => match authenticate(&headers, &uri, &state) {
            Ok(user) => perform_check(&state, &user).await.into_response(),
            Err(e) => e.into_response(),
        },
    }
}
