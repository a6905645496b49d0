//! Business logic shared by handlers and repositories
//!
//! - [`auth`] - register / login / logout / check
//! - [`dashboard`] - back-office summary
//! - [`sales`] - sale pricing and settlement
//! - [`seed`] - default catalog

pub mod auth;
pub mod dashboard;
pub mod sales;
pub mod seed;
