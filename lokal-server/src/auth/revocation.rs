//! Revoked token registry
//!
//! Logout stores the token's `jti` until the token would have expired anyway.

use std::sync::Arc;

use dashmap::DashMap;

#[derive(Clone, Default)]
pub struct RevocationList {
    /// jti -> token expiry (Unix seconds)
    inner: Arc<DashMap<String, i64>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, jti: impl Into<String>, expires_at: i64) {
        self.inner.insert(jti.into(), expires_at);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.inner.contains_key(jti)
    }

    /// Drop entries whose token has expired; returns how many were removed
    pub fn purge_expired(&self, now_secs: i64) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, expires_at| *expires_at > now_secs);
        before.saturating_sub(self.inner.len())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
