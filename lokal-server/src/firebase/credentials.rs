//! Service-account credential and environment settings
//!
//! Nothing here is compiled in: the credential comes from
//! `FIREBASE_CREDENTIALS`, which holds either the JSON document itself or a
//! path to it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::FirebaseError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Raw Firebase-related environment values, captured at startup
#[derive(Clone, Default)]
pub struct FirebaseSettings {
    /// Inline service-account JSON or a path to it
    pub credentials: Option<String>,
    pub database_url: Option<String>,
    pub project_id: Option<String>,
}

impl std::fmt::Debug for FirebaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSettings")
            .field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
            .field("database_url", &self.database_url)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl FirebaseSettings {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            credentials: var("FIREBASE_CREDENTIALS"),
            database_url: var("FIREBASE_DATABASE_URL").map(|u| u.trim().trim_end_matches('/').to_string()),
            project_id: var("FIREBASE_PROJECT_ID").map(|p| p.trim().to_string()),
        }
    }

    /// Presence flags reported by the connectivity probe
    pub fn env_flags(&self) -> EnvFlags {
        EnvFlags {
            has_credentials: self.credentials.is_some(),
            has_database_url: self.database_url.is_some(),
            has_project_id: self.project_id.is_some(),
        }
    }
}

/// Which Firebase variables are set (and not blank)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvFlags {
    pub has_credentials: bool,
    pub has_database_url: bool,
    pub has_project_id: bool,
}

impl EnvFlags {
    /// Flags for the variables as `lookup` sees them now
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        FirebaseSettings::from_lookup(lookup).env_flags()
    }
}

/// Google service-account key (the fields used for token exchange)
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    /// Parse inline JSON, or read the file the value points at
    pub fn load(raw: &str) -> Result<Self, FirebaseError> {
        let raw = raw.trim();
        let json = if raw.starts_with('{') {
            raw.to_string()
        } else {
            std::fs::read_to_string(Path::new(raw))?
        };
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, FirebaseError> {
        let account: Self = serde_json::from_str(json)
            .map_err(|e| FirebaseError::Credentials(e.to_string()))?;
        if account.client_email.trim().is_empty() {
            return Err(FirebaseError::Credentials("client_email is empty".into()));
        }
        if !account.private_key.contains("PRIVATE KEY") {
            return Err(FirebaseError::Credentials(
                "private_key is not a PEM private key".into(),
            ));
        }
        Ok(account)
    }
}
