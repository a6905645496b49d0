//! Realtime database seam and its Firebase REST implementation
//!
//! The probe only needs "write a document, read it back", so the traits stay
//! that small. [`FirebaseConnector`] authenticates with a service-account
//! OAuth token (RS256 assertion exchanged at the account's `token_uri`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::credentials::{FirebaseSettings, ServiceAccount};
use super::error::FirebaseError;

const OAUTH_SCOPES: &str =
    "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh the cached access token this long before it expires
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// A connected realtime database client
#[async_trait]
pub trait RealtimeDatabase: Send + Sync {
    /// Replace the value stored at `path`
    async fn set(&self, path: &str, value: &Value) -> Result<(), FirebaseError>;

    /// Read the value stored at `path` (`Null` when absent)
    async fn get(&self, path: &str) -> Result<Value, FirebaseError>;
}

/// Produces database clients; injected into [`ServerState`](crate::ServerState)
#[async_trait]
pub trait RealtimeConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn RealtimeDatabase>, FirebaseError>;

    /// Project the connector talks to, when known
    fn project_id(&self) -> Option<String>;
}

/// Firebase Realtime Database connector
///
/// The credential is read once, at construction. A credential that fails to
/// load is kept as an error and reported by every `connect()`.
pub struct FirebaseConnector {
    /// `None` when `FIREBASE_CREDENTIALS` is unset
    account: Option<Result<Arc<ServiceAccount>, String>>,
    database_url: Option<String>,
    project_id: Option<String>,
    http: reqwest::Client,
    tokens: Arc<TokenCache>,
}

impl FirebaseConnector {
    pub fn from_settings(settings: &FirebaseSettings, timeout: Duration) -> Self {
        let account = settings
            .credentials
            .as_deref()
            .map(|raw| ServiceAccount::load(raw).map(Arc::new).map_err(|e| e.to_string()));

        match &account {
            Some(Ok(account)) => tracing::info!(
                client_email = %account.client_email,
                "Firebase service account loaded"
            ),
            Some(Err(reason)) => tracing::warn!(%reason, "Firebase service account unavailable"),
            None => tracing::info!("FIREBASE_CREDENTIALS not set; connectivity probe will fail"),
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            account,
            database_url: settings.database_url.clone(),
            project_id: settings.project_id.clone(),
            http,
            tokens: Arc::new(TokenCache::default()),
        }
    }
}

#[async_trait]
impl RealtimeConnector for FirebaseConnector {
    async fn connect(&self) -> Result<Box<dyn RealtimeDatabase>, FirebaseError> {
        let account = match &self.account {
            Some(Ok(account)) => account.clone(),
            Some(Err(reason)) => return Err(FirebaseError::Credentials(reason.clone())),
            None => return Err(FirebaseError::NotConfigured("FIREBASE_CREDENTIALS")),
        };
        let base_url = self
            .database_url
            .clone()
            .ok_or(FirebaseError::NotConfigured("FIREBASE_DATABASE_URL"))?;

        let access_token = self.tokens.access_token(&self.http, &account).await?;
        Ok(Box::new(RestDatabase {
            http: self.http.clone(),
            base_url,
            access_token,
        }))
    }

    fn project_id(&self) -> Option<String> {
        self.project_id.clone().or_else(|| {
            match &self.account {
                Some(Ok(account)) => account.project_id.clone(),
                _ => None,
            }
        })
    }
}

/// REST client for one database, bound to one access token
struct RestDatabase {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl RestDatabase {
    fn url(&self, path: &str) -> String {
        document_url(&self.base_url, path)
    }
}

fn document_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}.json",
        base_url.trim_end_matches('/'),
        path.trim_matches('/')
    )
}

async fn check_status(
    operation: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, FirebaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(FirebaseError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RealtimeDatabase for RestDatabase {
    async fn set(&self, path: &str, value: &Value) -> Result<(), FirebaseError> {
        let resp = self
            .http
            .put(self.url(path))
            .bearer_auth(&self.access_token)
            .json(value)
            .send()
            .await?;
        check_status("set", resp).await?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Value, FirebaseError> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let resp = check_status("get", resp).await?;
        Ok(resp.json::<Value>().await?)
    }
}

// ========== OAuth access token ==========

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Default)]
struct TokenCache {
    current: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    async fn access_token(
        &self,
        http: &reqwest::Client,
        account: &ServiceAccount,
    ) -> Result<String, FirebaseError> {
        // Held across the exchange so concurrent probes share one request
        let mut current = self.current.lock().await;
        if let Some(token) = current.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.value.clone());
        }

        let assertion = sign_assertion(account, chrono::Utc::now().timestamp())?;
        let resp = http
            .post(&account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = check_status("token exchange", resp).await?.json().await?;

        tracing::debug!(expires_in = token.expires_in, "Obtained Firebase access token");
        *current = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(token.access_token)
    }
}

fn sign_assertion(account: &ServiceAccount, now: i64) -> Result<String, FirebaseError> {
    let claims = AssertionClaims {
        iss: &account.client_email,
        scope: OAUTH_SCOPES,
        aud: &account.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = account.private_key_id.clone();

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;
    Ok(encode(&header, &claims, &key)?)
}
