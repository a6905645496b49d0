//! CurrentUser extractor
//!
//! Reuses the principal injected by [`require_auth`](super::require_auth);
//! otherwise validates the bearer token itself, so handlers that need a
//! principal answer 401 the same way under either auth policy.

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::AppError;
use crate::auth::{CurrentUser, authenticate};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, &parts.uri, state)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
