//! Core module - server configuration, state and errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state handed to every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup / runtime errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{AuthPolicy, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::{EnvLookup, ServerState};
