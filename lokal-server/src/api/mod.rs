//! HTTP handlers
//!
//! Handlers are plain async functions; [`crate::routing`] binds them to paths
//! from the route table.
//!
//! - [`auth`] - login / register / logout / check-auth
//! - [`legacy`] - `auth.php` action dispatch
//! - [`dashboard`] - summary
//! - [`products`], [`customers`], [`transactions`] - CRUD
//! - [`setup`] - status / initialize
//! - [`stores`], [`health`], [`probe`] - fixed-shape responses

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod legacy;
pub mod payload;
pub mod probe;
pub mod products;
pub mod setup;
pub mod stores;
pub mod transactions;

pub use payload::Payload;
