//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two limiters, applied per route group:
//! - `auth_rate_limiter`: strict limits for login/registration (~10/min)
//! - `lookup_rate_limiter`: moderate limits for the order lookup by phone
//!   (~30/min); the endpoint enumerates by phone number, so it must not
//!   be free to hammer

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter layer type for Axum.
///
/// Keys on the peer IP; the service binds behind a proxy that preserves
/// client addresses.
pub type RateLimiterLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
/// This slows brute force attempts against login/registration.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid
/// positive integers, which are always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(PeerIpKeyExtractor)
        .per_second(6) // Replenish 1 token every 6 seconds (~10/minute)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for the order lookup: ~30 requests per minute per IP.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid
/// positive integers, which are always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn lookup_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(PeerIpKeyExtractor)
        .per_second(2) // Replenish 1 token every 2 seconds (~30/minute)
        .burst_size(10)
        .finish()
        .expect("rate limiter config with per_second(2) and burst_size(10) is valid");
    GovernorLayer::new(Arc::new(config))
}
