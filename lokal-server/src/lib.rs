//! MarketLokal back-office server
//!
//! # Architecture
//!
//! One fixed route table maps every (method, path) pair, including the
//! legacy `*.php` URLs, onto a named operation:
//!
//! - **Routing** (`routing`): route descriptors, legacy `action` resolution, reverse lookup
//! - **Auth** (`auth`): HS256 JWT, Argon2 passwords, revocation, rate limiting
//! - **API** (`api`): thin handlers over the store-backed services
//! - **Store** (`store`): in-memory tables behind an async `RwLock`
//! - **Firebase** (`firebase`): realtime database client for the connectivity probe
//!
//! # Module layout
//!
//! ```text
//! lokal-server/src/
//! ├── core/          # config, state, server, errors
//! ├── routing/       # route table, legacy action dispatch
//! ├── auth/          # JWT, middleware, extractors, rate limit
//! ├── api/           # HTTP handlers
//! ├── services/      # sales pricing, dashboard, seed catalog
//! ├── store/         # in-memory repositories
//! ├── firebase/      # service account + REST client
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod firebase;
pub mod routing;
pub mod services;
pub mod store;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{AuthPolicy, Config, Server, ServerState};
pub use routing::{LegacyAction, ROUTES, build_router, url_for};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - supports tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() {
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __  ___                 __        __                    __
   /  |/  /___ ______/ /_____  / /_      / /   ____  / /______ _/ /
  / /|_/ / __ `/ ___/ //_/ _ \/ __/_____/ /   / __ \/ //_/ __ `/ /
 / /  / / /_/ / /  / ,< /  __/ /_/_____/ /___/ /_/ / ,< / /_/ / /
/_/  /_/\__,_/_/  /_/|_|\___/\__/     /_____/\____/_/|_|\__,_/_/
    "#
    );
}
