//! Request routing
//!
//! - [`table`] - the route table, its validation and reverse lookup
//! - [`action`] - legacy `action` discriminator
//! - [`router`] - axum router assembly

pub mod action;
pub mod router;
pub mod table;

pub use action::LegacyAction;
pub use router::{build_router, build_routes};
pub use table::{
    Access, Operation, ROUTES, RouteDescriptor, RouteTableError, Verb, url_for, validate,
};
