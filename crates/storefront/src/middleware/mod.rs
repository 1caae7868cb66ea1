//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. Request ID (add unique ID to each request)
//! 3. Session layer (tower-sessions, in-process store)
//! 4. Rate limiting (governor) on auth and lookup routes

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use rate_limit::{auth_rate_limiter, lookup_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
