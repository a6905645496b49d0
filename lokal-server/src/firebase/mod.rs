//! Firebase Realtime Database client
//!
//! Used only by the `/firebase-test` connectivity probe.

mod client;
mod credentials;
mod error;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{FirebaseConnector, RealtimeConnector, RealtimeDatabase};
pub use credentials::{EnvFlags, FirebaseSettings, ServiceAccount};
pub use error::FirebaseError;
