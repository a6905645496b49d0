//! Authentication module
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - authenticated principal
//! - [`require_auth`] - middleware for `Authenticated` routes
//! - [`RateLimiter`] - login / register throttling
//! - [`RevocationList`] - tokens revoked by logout

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod rate_limit;
pub mod revocation;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{authenticate, require_auth};
pub use password::{hash_password, verify_password};
pub use rate_limit::{ClientIp, RateLimiter};
pub use revocation::RevocationList;
