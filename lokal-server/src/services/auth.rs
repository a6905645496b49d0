//! Account operations behind the auth routes

use shared::models::{AuthStatus, LoginRequest, LoginResponse, RegisterRequest, User, UserInfo};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::security_log;
use crate::store::UserRepository;
use crate::store::user::NewUser;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_password, validate_required_text,
};

const TOKEN_TYPE: &str = "Bearer";

/// Create an account and sign it in
pub async fn register(state: &ServerState, req: RegisterRequest) -> AppResult<LoginResponse> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = UserRepository::new(state.store.clone())
        .create(NewUser {
            name: req.name,
            email: req.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User registered");
    issue_token(state, &user)
}

/// Verify credentials and issue a token.
///
/// Unknown email and wrong password produce the same error.
pub async fn login(state: &ServerState, req: LoginRequest) -> AppResult<LoginResponse> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "email and password are required",
        ));
    }
    if req.password.chars().count() > MAX_PASSWORD_LEN {
        return Err(AppError::invalid_credentials());
    }

    let user = UserRepository::new(state.store.clone())
        .find_by_email(&req.email)
        .await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        Some(user) => {
            security_log!(
                "WARN",
                "login_failed",
                user_id = user.id.clone(),
                reason = "invalid_password"
            );
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        security_log!("WARN", "login_disabled", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User logged in");
    issue_token(state, &user)
}

/// Revoke the presented token until it would have expired
pub fn logout(state: &ServerState, user: &CurrentUser) {
    state.revocations.revoke(user.jti.clone(), user.expires_at);
    tracing::info!(user_id = %user.id, "User logged out");
}

/// Confirm the principal still maps to an active account
pub async fn check(state: &ServerState, user: &CurrentUser) -> AppResult<AuthStatus> {
    let stored = UserRepository::new(state.store.clone())
        .find_by_id(&user.id)
        .await?
        .ok_or_else(AppError::not_authenticated)?;

    if !stored.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(AuthStatus {
        authenticated: true,
        user: UserInfo::from(&stored),
    })
}

fn issue_token(state: &ServerState, user: &User) -> AppResult<LoginResponse> {
    let (token, claims) = state
        .get_jwt_service()
        .generate_token(user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(LoginResponse {
        token,
        token_type: TOKEN_TYPE.to_string(),
        expires_at: claims.exp,
        user: UserInfo::from(user),
    })
}
