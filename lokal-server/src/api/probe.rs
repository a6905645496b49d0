//! `/firebase-test`: realtime database connectivity probe
//!
//! Writes a small document to [`PROBE_PATH`], reads it back and reports both.
//! Any failure is answered with 500 plus the Firebase environment flags. No
//! retries.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::firebase::{EnvFlags, FirebaseError};

/// Fixed location of the probe document
pub const PROBE_PATH: &str = "connectivity-test";

#[derive(Debug, Serialize)]
struct ProbeSuccess {
    status: &'static str,
    message: &'static str,
    data_written: Value,
    data_read: Value,
    firebase_project: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProbeFailure {
    status: &'static str,
    message: String,
    env_check: EnvFlags,
}

/// GET /firebase-test
pub async fn firebase_test(State(state): State<ServerState>) -> Response {
    let project_id = state.firebase.project_id();
    let document = json!({
        "message": "Hello from MarketLokal backend",
        "timestamp": Utc::now().to_rfc3339(),
        "from": "lokal-server",
        "project_id": project_id,
    });

    match round_trip(&state, &document).await {
        Ok(data_read) => {
            tracing::info!(path = PROBE_PATH, "Firebase probe succeeded");
            Json(ProbeSuccess {
                status: "success",
                message: "Firebase connection successful",
                data_written: document,
                data_read,
                firebase_project: project_id,
            })
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Firebase probe failed");
            let body = ProbeFailure {
                status: "error",
                message: format!("Firebase connection failed: {e}"),
                env_check: state.env_flags(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn round_trip(state: &ServerState, document: &Value) -> Result<Value, FirebaseError> {
    let db = state.firebase.connect().await?;
    db.set(PROBE_PATH, document).await?;
    db.get(PROBE_PATH).await
}
