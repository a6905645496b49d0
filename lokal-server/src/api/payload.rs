//! Request body extractor shared by REST and legacy handlers
//!
//! | Request | Decoded from |
//! |---------|--------------|
//! | GET / HEAD | `{}` (the body is never read) |
//! | `application/x-www-form-urlencoded` | form fields |
//! | anything else | JSON; an empty body counts as `{}` |

use axum::Form;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use http::{Method, header};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::{AppError, ErrorCode};

const EMPTY_OBJECT: &[u8] = b"{}";

/// JSON or form body, decoded into `T`
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() == Method::GET || req.method() == Method::HEAD {
            return decode_json(EMPTY_OBJECT).map(Payload);
        }

        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.body_text()))?;
            return Ok(Payload(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return decode_json(EMPTY_OBJECT).map(Payload);
        }
        decode_json(&bytes).map(Payload)
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Syntax errors are `InvalidFormat`; well-formed JSON of the wrong shape is
/// `ValidationFailed`.
pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => AppError::validation(e.to_string()),
        _ => AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid JSON body: {e}")),
    })
}

/// Decode an already-parsed JSON value into `T`
pub(crate) fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::validation(e.to_string()))
}
