//! HTTP middleware for admin.

pub mod auth;

pub use auth::RequireOperator;
