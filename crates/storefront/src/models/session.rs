//! Session-related types.
//!
//! Types stored in the session: the authenticated user, the backend JWT,
//! the cart, and the suspended checkout.

use serde::{Deserialize, Serialize};

use tio_pelotte_core::{Email, Phone, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user;
/// everything else is fetched from the backend when needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend record ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// User's email address.
    pub email: Email,
    /// User's phone number, if registered.
    pub phone: Option<Phone>,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the backend-issued JWT of the current user.
    pub const BACKEND_JWT: &str = "backend_jwt";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the suspended checkout (set before the payment redirect,
    /// consumed on confirmation).
    pub const PENDING_CHECKOUT: &str = "pending_checkout";
}
