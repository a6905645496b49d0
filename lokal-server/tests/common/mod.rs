//! Helpers shared by the HTTP integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use lokal_server::firebase::{FirebaseError, RealtimeConnector, RealtimeDatabase};
use lokal_server::core::EnvLookup;
use lokal_server::{AuthPolicy, Config, ServerState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "rahasia123";

/// Connector whose `connect()` always fails
pub struct FailingConnector;

#[async_trait]
impl RealtimeConnector for FailingConnector {
    async fn connect(&self) -> Result<Box<dyn RealtimeDatabase>, FirebaseError> {
        Err(FirebaseError::NotConfigured("FIREBASE_CREDENTIALS"))
    }

    fn project_id(&self) -> Option<String> {
        None
    }
}

/// Connector backed by a shared in-memory map
#[derive(Default, Clone)]
pub struct MemoryConnector {
    pub documents: Arc<Mutex<HashMap<String, Value>>>,
}

struct MemoryDatabase {
    documents: Arc<Mutex<HashMap<String, Value>>>,
}

#[async_trait]
impl RealtimeDatabase for MemoryDatabase {
    async fn set(&self, path: &str, value: &Value) -> Result<(), FirebaseError> {
        self.documents
            .lock()
            .unwrap()
            .insert(path.to_string(), value.clone());
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Value, FirebaseError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

#[async_trait]
impl RealtimeConnector for MemoryConnector {
    async fn connect(&self) -> Result<Box<dyn RealtimeDatabase>, FirebaseError> {
        Ok(Box::new(MemoryDatabase {
            documents: self.documents.clone(),
        }))
    }

    fn project_id(&self) -> Option<String> {
        Some("demo-project".to_string())
    }
}

pub fn state(policy: AuthPolicy) -> ServerState {
    state_with(policy, Arc::new(FailingConnector))
}

pub fn state_with(policy: AuthPolicy, connector: Arc<dyn RealtimeConnector>) -> ServerState {
    let config = Config {
        auth_policy: policy,
        ..Config::default()
    };
    ServerState::with_connector(config, connector).with_env_lookup(env(&[]))
}

/// Environment lookup over a fixed set of variables
pub fn env(vars: &[(&str, &str)]) -> EnvLookup {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(move |name: &str| vars.get(name).cloned())
}

pub fn app(state: &ServerState) -> Router {
    build_router(state.clone()).unwrap()
}

/// Minimal request description
pub struct Call<'a> {
    pub method: Method,
    pub uri: &'a str,
    pub token: Option<&'a str>,
    pub body: Option<Value>,
    pub form: Option<&'a str>,
}

impl<'a> Call<'a> {
    pub fn new(method: Method, uri: &'a str) -> Self {
        Self {
            method,
            uri,
            token: None,
            body: None,
            form: None,
        }
    }

    pub fn get(uri: &'a str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &'a str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn form(mut self, form: &'a str) -> Self {
        self.form = Some(form);
        self
    }
}

/// Response status, `x-request-id` and JSON body
pub struct Reply {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, call: Call<'_>) -> Reply {
    let mut builder = Request::builder().method(call.method).uri(call.uri);
    if let Some(token) = call.token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = if let Some(form) = call.form {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        Body::from(form.to_string())
    } else if let Some(json) = call.body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
    } else {
        Body::empty()
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        request_id,
        body,
    }
}

/// Register an account and return its token
pub async fn register(app: &Router, email: &str) -> String {
    let reply = send(
        app,
        Call::post("/register").json(json!({
            "name": "Kasir Satu",
            "email": email,
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"]["token"].as_str().unwrap().to_string()
}

/// Seed the default catalog and walk-in customer
pub async fn initialize(app: &Router, token: &str) {
    let reply = send(app, Call::post("/setup/initialize").token(token)).await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
}
