use std::time::Duration;

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::firebase::FirebaseSettings;

/// Minimum accepted length of `JWT_SECRET`
const MIN_JWT_SECRET_LEN: usize = 32;

/// How `Authenticated` routes are gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Bearer token required (default)
    #[default]
    Enforced,
    /// Migration mode: every route is reachable without a token
    Open,
}

impl AuthPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "enforced" => Some(Self::Enforced),
            "open" => Some(Self::Open),
            _ => None,
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | ENVIRONMENT | development | development \| staging \| production |
/// | HTTP_HOST | 0.0.0.0 | |
/// | HTTP_PORT | 8000 | |
/// | API_PREFIX | (empty) | e.g. `/api` |
/// | AUTH_POLICY | enforced | `open` disables token checks |
/// | JWT_SECRET | dev: random | required outside development, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | |
/// | JWT_ISSUER | marketlokal | |
/// | LOGIN_RATE_LIMIT | 10 | requests per minute per IP |
/// | REGISTER_RATE_LIMIT | 5 | requests per minute per IP |
/// | CORS_ALLOWED_ORIGINS | (any in development) | comma-separated |
/// | REQUEST_TIMEOUT_MS | 30000 | |
/// | FIREBASE_CREDENTIALS | | inline JSON or file path |
/// | FIREBASE_DATABASE_URL | | |
/// | FIREBASE_PROJECT_ID | | |
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_host: String,
    pub http_port: u16,
    /// Mount point for every route, normalized to `""` or `/segment`
    pub api_prefix: String,
    pub auth_policy: AuthPolicy,
    pub jwt: JwtConfig,
    /// Login attempts per minute per client IP
    pub login_rate_limit: u32,
    /// Registrations per minute per client IP
    pub register_rate_limit: u32,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_ms: u64,
    pub firebase: FirebaseSettings,
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let auth_policy = match var("AUTH_POLICY") {
            Some(raw) => AuthPolicy::parse(&raw).ok_or_else(|| {
                ServerError::Config(format!("AUTH_POLICY must be 'enforced' or 'open', got '{raw}'"))
            })?,
            None => AuthPolicy::Enforced,
        };

        let secret = Self::require_secret(var("JWT_SECRET"), &environment)?;

        let mut config = Self {
            environment: environment.clone(),
            http_host: var("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            http_port: parse_or(var("HTTP_PORT"), 8000),
            api_prefix: normalize_prefix(var("API_PREFIX").as_deref().unwrap_or("")),
            auth_policy,
            jwt: JwtConfig {
                secret,
                expiration_minutes: parse_or(var("JWT_EXPIRATION_MINUTES"), 1440),
                issuer: var("JWT_ISSUER").unwrap_or_else(|| "marketlokal".into()),
            },
            login_rate_limit: parse_or(var("LOGIN_RATE_LIMIT"), 10),
            register_rate_limit: parse_or(var("REGISTER_RATE_LIMIT"), 5),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            request_timeout_ms: parse_or(var("REQUEST_TIMEOUT_MS"), 30_000),
            firebase: FirebaseSettings::from_lookup(&lookup),
        };

        if !is_development && config.cors_allowed_origins.is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS not set in {environment}; cross-origin requests will be rejected");
        }
        if config.request_timeout_ms == 0 {
            config.request_timeout_ms = 30_000;
        }

        Ok(config)
    }

    /// `JWT_SECRET` must be set outside development and must be long enough everywhere.
    fn require_secret(value: Option<String>, environment: &str) -> Result<String> {
        match value {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => Err(ServerError::Config(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long"
            ))),
            Some(secret) => Ok(secret),
            None if environment == "development" => {
                tracing::warn!("JWT_SECRET not set! Generating a temporary key for development.");
                Ok(generate_dev_secret())
            }
            None => Err(ServerError::Config(format!(
                "JWT_SECRET must be set in {environment} environment"
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    /// Development defaults, without touching the environment
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_host: "0.0.0.0".into(),
            http_port: 8000,
            api_prefix: String::new(),
            auth_policy: AuthPolicy::Enforced,
            jwt: JwtConfig {
                secret: generate_dev_secret(),
                expiration_minutes: 1440,
                issuer: "marketlokal".into(),
            },
            login_rate_limit: 10,
            register_rate_limit: 5,
            cors_allowed_origins: Vec::new(),
            request_timeout_ms: 30_000,
            firebase: FirebaseSettings::default(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// `"api/"` -> `"/api"`, `"/"` -> `""`
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn generate_dev_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
