use std::sync::Arc;
use std::time::Duration;

use crate::auth::{JwtService, RateLimiter, RevocationList};
use crate::core::{AuthPolicy, Config};
use crate::firebase::{EnvFlags, FirebaseConnector, RealtimeConnector};
use crate::store::MemoryStore;

/// Timeout for outbound calls to the realtime database
const FIREBASE_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable lookup, consulted when the probe reports its flags
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Shared server state
///
/// Cheap to clone: every field is an `Arc` handle.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | store | in-memory tables |
/// | jwt | token issue / validation |
/// | revocations | logged-out token ids |
/// | rate_limiter | login / register throttling |
/// | firebase | realtime database connector for the probe |
/// | env | environment lookup for the probe's failure report |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: MemoryStore,
    pub jwt: Arc<JwtService>,
    pub revocations: RevocationList,
    pub rate_limiter: RateLimiter,
    pub firebase: Arc<dyn RealtimeConnector>,
    env: EnvLookup,
}

impl ServerState {
    /// Build production state: the Firebase credential is loaded here, once.
    pub fn initialize(config: &Config) -> Self {
        let connector = FirebaseConnector::from_settings(&config.firebase, FIREBASE_HTTP_TIMEOUT);
        Self::with_connector(config.clone(), Arc::new(connector))
    }

    /// Build state around an explicit realtime database connector
    pub fn with_connector(config: Config, firebase: Arc<dyn RealtimeConnector>) -> Self {
        if config.auth_policy == AuthPolicy::Open {
            tracing::warn!(
                "AUTH_POLICY=open: authenticated routes are reachable without a token. Use only during migration."
            );
        }

        Self {
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            config: Arc::new(config),
            store: MemoryStore::new(),
            revocations: RevocationList::new(),
            rate_limiter: RateLimiter::new(),
            firebase,
            env: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the process environment as the source of the probe's flags
    pub fn with_env_lookup(mut self, lookup: EnvLookup) -> Self {
        self.env = lookup;
        self
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt
    }

    /// Which Firebase variables are set right now
    pub fn env_flags(&self) -> EnvFlags {
        EnvFlags::from_lookup(|name| (self.env)(name))
    }

    /// Spawn periodic maintenance (rate limiter + revocation list cleanup every 5 minutes)
    pub fn start_background_tasks(&self) {
        let rate_limiter = self.rate_limiter.clone();
        let revocations = self.revocations.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));
            loop {
                interval.tick().await;
                rate_limiter.cleanup().await;
                let purged = revocations.purge_expired(chrono::Utc::now().timestamp());
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired token revocations");
                }
            }
        });
    }
}
