//! Router assembly
//!
//! Builds the axum [`Router`] from [`ROUTES`]: one `MethodRouter` per path,
//! auth gating per descriptor, JSON 404/405 fallbacks, then the tower-http
//! stack.

use std::collections::BTreeMap;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodFilter, MethodRouter, on};
use http::{HeaderValue, Method, StatusCode, Uri};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::table::{Access, Operation, ROUTES, RouteDescriptor, validate};
use crate::api;
use crate::auth::require_auth;
use crate::core::{AuthPolicy, Config, ServerError, ServerState};
use crate::{AppError, ErrorCode};

impl Operation {
    /// Handler for this operation, restricted to `filter`
    fn bind(self, filter: MethodFilter) -> MethodRouter<ServerState> {
        match self {
            Operation::Login => on(filter, api::auth::login),
            Operation::Register => on(filter, api::auth::register),
            Operation::UserPlaceholder => on(filter, api::auth::user),
            Operation::Logout => on(filter, api::auth::logout),
            Operation::CheckAuth => on(filter, api::auth::check),
            Operation::DashboardSummary => on(filter, api::dashboard::summary),
            Operation::LegacyAuth => on(filter, api::legacy::auth_php),
            Operation::ProductsList => on(filter, api::products::list),
            Operation::ProductsCreate => on(filter, api::products::create),
            Operation::ProductsShow => on(filter, api::products::show),
            Operation::ProductsUpdate => on(filter, api::products::update),
            Operation::ProductsDestroy => on(filter, api::products::destroy),
            Operation::TransactionsList => on(filter, api::transactions::list),
            Operation::TransactionsCreate => on(filter, api::transactions::create),
            Operation::TransactionsShow => on(filter, api::transactions::show),
            Operation::CustomersList => on(filter, api::customers::list),
            Operation::CustomersCreate => on(filter, api::customers::create),
            Operation::CustomersShow => on(filter, api::customers::show),
            Operation::CustomersReceivables => on(filter, api::customers::update_receivables),
            Operation::SetupStatus => on(filter, api::setup::status),
            Operation::SetupInitialize => on(filter, api::setup::initialize),
            Operation::StoresMock => on(filter, api::stores::list),
            Operation::FirebaseProbe => on(filter, api::probe::firebase_test),
            Operation::Health => on(filter, api::health::health),
        }
    }
}

fn method_filter(route: &RouteDescriptor) -> Option<MethodFilter> {
    route
        .methods
        .iter()
        .map(|v| v.filter())
        .reduce(MethodFilter::or)
}

/// Route table only: no middleware stack, no state
pub fn build_routes(state: &ServerState) -> Result<Router<ServerState>, ServerError> {
    validate(ROUTES)?;

    let gate = state.config.auth_policy == AuthPolicy::Enforced;
    let mut by_path: BTreeMap<&'static str, MethodRouter<ServerState>> = BTreeMap::new();

    for route in ROUTES {
        let Some(filter) = method_filter(route) else {
            continue;
        };
        let mut handler = route.operation.bind(filter);
        if gate && route.access == Access::Authenticated {
            handler = handler.route_layer(from_fn_with_state(state.clone(), require_auth));
        }
        let merged = match by_path.remove(route.path) {
            Some(existing) => existing.merge(handler),
            None => handler,
        };
        by_path.insert(route.path, merged);
    }

    let router = by_path
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            router.route(path, handler)
        })
        .method_not_allowed_fallback(method_not_allowed);

    tracing::debug!(routes = ROUTES.len(), gated = gate, "Route table built");
    Ok(router)
}

/// Fully configured application: routes under the API prefix, fallbacks,
/// tower-http middleware and state
pub fn build_router(state: ServerState) -> Result<Router, ServerError> {
    let routes = build_routes(&state)?;
    let config = state.config.clone();

    let app = if config.api_prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&config.api_prefix, routes)
    };

    let app = app
        .fallback(not_found)
        .layer(cors_layer(&config))
        .layer(timeout_layer(&config))
        .layer(TraceLayer::new_for_http())
        // Set runs first, so generated ids are propagated too
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(app)
}

fn timeout_layer(config: &Config) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_development() && config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::with_message(ErrorCode::NotFound, format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::MethodNotAllowed,
        format!("{method} is not allowed on {}", uri.path()),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let config = Config {
            request_timeout_ms: 20,
            ..Config::default()
        };
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .layer(timeout_layer(&config));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
