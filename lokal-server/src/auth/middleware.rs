//! Authentication middleware
//!
//! Attached with `route_layer` to every `Authenticated` descriptor when the
//! auth policy is `enforced`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Uri};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Resolve the principal from an `Authorization: Bearer <token>` header.
///
/// | Failure | Error |
/// |---------|-------|
/// | header missing | 401 NotAuthenticated |
/// | not a bearer token | 401 TokenInvalid |
/// | expired | 401 TokenExpired |
/// | bad signature / malformed | 401 TokenInvalid |
/// | logged out | 401 TokenRevoked |
pub fn authenticate(
    headers: &HeaderMap,
    uri: &Uri,
    state: &ServerState,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.to_string()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    if state.revocations.is_revoked(&claims.jti) {
        security_log!(
            "WARN",
            "auth_revoked",
            user_id = claims.sub.clone(),
            uri = uri.to_string()
        );
        return Err(AppError::token_revoked());
    }

    Ok(CurrentUser::from(claims))
}

/// Require a valid, unrevoked token and inject [`CurrentUser`] into request extensions
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let user = authenticate(req.headers(), req.uri(), &state)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
