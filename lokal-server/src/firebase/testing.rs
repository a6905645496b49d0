//! In-process connectors for unit tests

use async_trait::async_trait;

use super::{FirebaseError, RealtimeConnector, RealtimeDatabase};

/// Connector whose `connect()` always fails
#[derive(Debug, Default)]
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
