//! Tío Pelotte Core - Shared types library.
//!
//! This crate provides common types used across all Tío Pelotte components:
//! - `storefront` - Public-facing pasta shop
//! - `admin` - Internal back-office panel
//! - `cli` - Command-line tools for seeding and inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, phones, emails,
//!   statuses, and the checkout idempotency token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
