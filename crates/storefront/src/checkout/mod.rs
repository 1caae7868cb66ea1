//! Checkout: order assembly and the payment flow state machine.
//!
//! # Flow
//!
//! ```text
//! Idle -> CreatingTempOrder -> CreatingPaymentPreference
//!      -> RedirectedToPayment -> ConfirmingPayment -> Confirmed | Failed
//! ```
//!
//! The [`assembler`] turns cart + delivery fields into the backend's order
//! payload (pure, no I/O). The [`orchestrator`] drives the flow against
//! two ports - the order backend and the payment gateway - so the
//! transitions are testable without a network.

pub mod assembler;
pub mod orchestrator;

pub use assembler::{CheckoutContact, OrderDraft, ValidationError};
pub use orchestrator::{
    BackUrls, CheckoutError, CheckoutOrchestrator, CheckoutState, OrderBackend, PaymentGateway,
    PaymentPreference, PaymentRedirect, PendingCheckout,
};
