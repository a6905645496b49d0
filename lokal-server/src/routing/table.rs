//! Route table
//!
//! Every route the server answers is one [`RouteDescriptor`] in [`ROUTES`].
//! The router is built from this table, and reverse lookup ([`url_for`])
//! reads it too.

use std::collections::HashSet;
use std::fmt;

use axum::routing::MethodFilter;
use thiserror::Error;

/// HTTP verbs used by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability a request needs to reach the route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Valid, unrevoked bearer token (when the auth policy is enforced)
    Authenticated,
}

/// Named operations a route can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    UserPlaceholder,
    Logout,
    CheckAuth,
    DashboardSummary,
    LegacyAuth,
    ProductsList,
    ProductsCreate,
    ProductsShow,
    ProductsUpdate,
    ProductsDestroy,
    TransactionsList,
    TransactionsCreate,
    TransactionsShow,
    CustomersList,
    CustomersCreate,
    CustomersShow,
    CustomersReceivables,
    SetupStatus,
    SetupInitialize,
    StoresMock,
    FirebaseProbe,
    Health,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy)]
pub struct RouteDescriptor {
    /// Unique, used by [`url_for`]
    pub name: &'static str,
    pub methods: &'static [Verb],
    /// Literal path or `{param}` pattern, relative to the API prefix
    pub path: &'static str,
    pub access: Access,
    pub operation: Operation,
}

const fn route(
    name: &'static str,
    methods: &'static [Verb],
    path: &'static str,
    access: Access,
    operation: Operation,
) -> RouteDescriptor {
    RouteDescriptor {
        name,
        methods,
        path,
        access,
        operation,
    }
}

use self::Access::{Authenticated, Public};
use self::Verb::{Delete, Get, Post, Put};

#[rustfmt::skip]
pub const ROUTES: &[RouteDescriptor] = &[
    // Auth
    route("auth.login",    &[Post], "/login",      Public,        Operation::Login),
    route("auth.register", &[Post], "/register",   Public,        Operation::Register),
    route("auth.user",     &[Get],  "/user",       Authenticated, Operation::UserPlaceholder),
    route("auth.logout",   &[Post], "/logout",     Authenticated, Operation::Logout),
    route("auth.check",    &[Get],  "/check-auth", Authenticated, Operation::CheckAuth),

    // Dashboard (REST + legacy aliases)
    route("dashboard",        &[Get], "/dashboard",            Authenticated, Operation::DashboardSummary),
    route("api.dashboard",    &[Get], "/dashboard.php",        Authenticated, Operation::DashboardSummary),
    route("legacy.dashboard", &[Get], "/legacy/dashboard.php", Authenticated, Operation::DashboardSummary),

    // Legacy action dispatch
    route("api.auth",    &[Get, Post], "/auth.php",        Public, Operation::LegacyAuth),
    route("legacy.auth", &[Get, Post], "/legacy/auth.php", Public, Operation::LegacyAuth),

    // Products
    route("api.products.index",   &[Get],    "/products",      Authenticated, Operation::ProductsList),
    route("api.products.store",   &[Post],   "/products",      Authenticated, Operation::ProductsCreate),
    route("api.products.show",    &[Get],    "/products/{id}", Authenticated, Operation::ProductsShow),
    route("api.products.update",  &[Put],    "/products/{id}", Authenticated, Operation::ProductsUpdate),
    route("api.products.destroy", &[Delete], "/products/{id}", Authenticated, Operation::ProductsDestroy),
    route("api.products",         &[Get],    "/products.php",  Authenticated, Operation::ProductsList),

    // Transactions
    route("api.transactions.index", &[Get],  "/transactions",      Authenticated, Operation::TransactionsList),
    route("api.transactions.store", &[Post], "/transactions",      Authenticated, Operation::TransactionsCreate),
    route("api.transactions.show",  &[Get],  "/transactions/{id}", Authenticated, Operation::TransactionsShow),

    // Customers
    route("api.customers.index",       &[Get],  "/customers",                  Authenticated, Operation::CustomersList),
    route("api.customers.store",       &[Post], "/customers",                  Authenticated, Operation::CustomersCreate),
    route("api.customers.show",        &[Get],  "/customers/{id}",             Authenticated, Operation::CustomersShow),
    route("api.customers.receivables", &[Put],  "/customers/{id}/receivables", Authenticated, Operation::CustomersReceivables),

    // Setup
    route("api.setup.status",     &[Get],  "/setup/status",     Authenticated, Operation::SetupStatus),
    route("api.setup.initialize", &[Post], "/setup/initialize", Authenticated, Operation::SetupInitialize),

    // Fixed responders
    route("api.stores",    &[Get], "/stores.php",    Authenticated, Operation::StoresMock),
    route("firebase.test", &[Get], "/firebase-test", Authenticated, Operation::FirebaseProbe),
    route("health",        &[Get], "/health",        Public,        Operation::Health),
];

/// Route table defects, detected when the router is built
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route name '{0}'")]
    DuplicateName(&'static str),

    #[error("{method} {path} is claimed by more than one route")]
    DuplicateRoute { method: Verb, path: &'static str },

    #[error("route '{name}' has no methods")]
    NoMethods { name: &'static str },

    #[error("route '{name}' path '{path}' must start with '/'")]
    InvalidPath {
        name: &'static str,
        path: &'static str,
    },
}

/// Check name uniqueness and that no (method, path) pair is claimed twice
pub fn validate(routes: &[RouteDescriptor]) -> Result<(), RouteTableError> {
    let mut names = HashSet::new();
    let mut pairs = HashSet::new();

    for r in routes {
        if !names.insert(r.name) {
            return Err(RouteTableError::DuplicateName(r.name));
        }
        if r.methods.is_empty() {
            return Err(RouteTableError::NoMethods { name: r.name });
        }
        if !r.path.starts_with('/') {
            return Err(RouteTableError::InvalidPath {
                name: r.name,
                path: r.path,
            });
        }
        for &method in r.methods {
            if !pairs.insert((method, r.path)) {
                return Err(RouteTableError::DuplicateRoute {
                    method,
                    path: r.path,
                });
            }
        }
    }
    Ok(())
}

/// Look up a descriptor by name
pub fn find(name: &str) -> Option<&'static RouteDescriptor> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Concrete path of a named route, `{param}` placeholders filled from `params`.
///
/// `None` for an unknown name, or when a placeholder has no value. The API
/// prefix is not included.
pub fn url_for(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let descriptor = find(name)?;
    let segments = descriptor
        .path
        .split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => params.iter().find(|(key, _)| *key == param).map(|(_, value)| *value),
            None => Some(segment),
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}
