//! Checkout flow state machine.
//!
//! Sequences temporary-order creation, payment-preference creation, the
//! redirect to the payment processor, and payment confirmation. The two
//! collaborators are ports ([`OrderBackend`], [`PaymentGateway`]) so the
//! transitions can be exercised with in-process fakes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tio_pelotte_core::{OrderId, PaymentStatus, PedidoToken, TempOrderId};

use crate::cart::Cart;
use crate::cms::CmsError;
use crate::services::mercadopago::PaymentError;

use super::assembler::{CheckoutContact, OrderDraft, ValidationError};

/// States of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    /// Nothing in flight.
    Idle,
    /// Temporary order being created on the backend.
    CreatingTempOrder,
    /// Payment preference being created on the gateway.
    CreatingPaymentPreference,
    /// Customer handed off to the gateway's hosted checkout.
    RedirectedToPayment,
    /// Payment identifier received back; confirming with the gateway.
    ConfirmingPayment,
    /// Order finalized and cart cleared.
    Confirmed,
    /// The flow stopped; recovery is the phone-number order lookup.
    Failed,
}

/// Errors surfaced by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart or contact fields were not submittable.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The order backend rejected or failed a call. Temp-order creation
    /// is safely retriable: the pedido token makes it idempotent.
    #[error("backend error: {0}")]
    Backend(#[from] CmsError),

    /// The payment gateway rejected or failed a call.
    #[error("payment gateway error: {0}")]
    Gateway(#[from] PaymentError),

    /// The gateway reported a non-approved payment status.
    #[error("payment not approved (status: {0:?})")]
    NotApproved(PaymentStatus),
}

/// Redirect target handed to the customer after `begin`.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRedirect {
    /// The gateway's hosted checkout URL.
    pub init_point: String,
    /// The gateway's preference ID.
    pub preference_id: String,
}

/// The suspended checkout, persisted in the session while the customer is
/// away at the payment processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCheckout {
    /// Idempotency token attached to the temporary order.
    pub token: PedidoToken,
    /// Backend record ID of the temporary order.
    pub temp_order_id: TempOrderId,
    /// The assembled payload, kept so confirmation can finalize the order
    /// without re-reading the cart.
    pub draft: OrderDraft,
}

/// Back URLs the gateway redirects the customer to after payment.
#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Build the standard back URLs from the storefront's public base URL.
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success: format!("{base}/checkout/confirm"),
            failure: format!("{base}/checkout/failed"),
            pending: format!("{base}/checkout/pending"),
        }
    }
}

/// A created payment preference.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPreference {
    /// Opaque preference ID.
    pub id: String,
    /// Hosted checkout URL to redirect the customer to.
    pub init_point: String,
}

/// Port to the order backend.
pub trait OrderBackend {
    /// Create the temporary order draft, keyed by the idempotency token.
    fn create_temp_order(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
    ) -> impl Future<Output = Result<TempOrderId, CmsError>> + Send;

    /// Create the final order after an approved payment.
    fn create_order(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
    ) -> impl Future<Output = Result<OrderId, CmsError>> + Send;
}

/// Port to the payment gateway.
pub trait PaymentGateway {
    /// Create a payment preference for the draft.
    fn create_preference(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
        back_urls: &BackUrls,
    ) -> impl Future<Output = Result<PaymentPreference, PaymentError>> + Send;

    /// Look up the status of a payment by the gateway's payment ID.
    fn payment_status(
        &self,
        payment_id: &str,
    ) -> impl Future<Output = Result<PaymentStatus, PaymentError>> + Send;
}

/// Drives one checkout through its states.
///
/// One orchestrator instance covers one request: `begin` for the
/// pre-redirect half of the flow, `confirm` for the post-redirect half
/// (the redirect itself suspends the flow; the pending checkout lives in
/// the session in between).
#[derive(Debug)]
pub struct CheckoutOrchestrator<B, G> {
    backend: B,
    gateway: G,
    state: CheckoutState,
}

impl<B: OrderBackend, G: PaymentGateway> CheckoutOrchestrator<B, G> {
    /// Create an orchestrator in the `Idle` state.
    pub const fn new(backend: B, gateway: G) -> Self {
        Self {
            backend,
            gateway,
            state: CheckoutState::Idle,
        }
    }

    /// The current state.
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Run the flow from `Idle` up to the payment redirect.
    ///
    /// The pedido token is generated before any backend call, so the
    /// temporary order stays correlatable even if the creation response
    /// is lost. A failed temp-order creation never reaches
    /// `CreatingPaymentPreference`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] and moves to `Failed` when any step
    /// fails; validation failures leave the machine in `Idle`.
    pub async fn begin(
        &mut self,
        cart: &Cart,
        contact: &CheckoutContact,
        back_urls: &BackUrls,
    ) -> Result<(PaymentRedirect, PendingCheckout), CheckoutError> {
        // Validation failures block submission without consuming a token.
        let draft = OrderDraft::assemble(cart, contact)?;
        let token = PedidoToken::generate();

        self.state = CheckoutState::CreatingTempOrder;
        let temp_order_id = match self.backend.create_temp_order(&draft, &token).await {
            Ok(id) => id,
            Err(e) => {
                self.state = CheckoutState::Failed;
                return Err(e.into());
            }
        };

        self.state = CheckoutState::CreatingPaymentPreference;
        let preference = match self.gateway.create_preference(&draft, &token, back_urls).await {
            Ok(p) => p,
            Err(e) => {
                self.state = CheckoutState::Failed;
                return Err(e.into());
            }
        };

        // The customer navigates away here; resumption happens in
        // `confirm`, not as a continuation of this call stack.
        self.state = CheckoutState::RedirectedToPayment;

        Ok((
            PaymentRedirect {
                init_point: preference.init_point,
                preference_id: preference.id,
            },
            PendingCheckout {
                token,
                temp_order_id,
                draft,
            },
        ))
    }

    /// Resume the flow after the gateway redirected back with a payment ID.
    ///
    /// An approved payment finalizes the order and clears the cart. Any
    /// other status - or a transport error - moves to `Failed` without
    /// touching the cart; the customer recovers through the phone-number
    /// order lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the payment is not approved or a
    /// collaborator call fails.
    pub async fn confirm(
        &mut self,
        cart: &mut Cart,
        pending: &PendingCheckout,
        payment_id: &str,
    ) -> Result<OrderId, CheckoutError> {
        self.state = CheckoutState::ConfirmingPayment;

        let status = match self.gateway.payment_status(payment_id).await {
            Ok(status) => status,
            Err(e) => {
                self.state = CheckoutState::Failed;
                return Err(e.into());
            }
        };

        if !status.is_approved() {
            self.state = CheckoutState::Failed;
            return Err(CheckoutError::NotApproved(status));
        }

        match self
            .backend
            .create_order(&pending.draft, &pending.token)
            .await
        {
            Ok(order_id) => {
                cart.clear();
                self.state = CheckoutState::Confirmed;
                Ok(order_id)
            }
            Err(e) => {
                self.state = CheckoutState::Failed;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use std::num::NonZeroU32;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tio_pelotte_core::{Phone, Price, ProductId};

    struct MockBackend {
        fail_temp_order: bool,
        temp_order_calls: AtomicUsize,
        order_calls: AtomicUsize,
    }

    impl MockBackend {
        fn ok() -> Self {
            Self {
                fail_temp_order: false,
                temp_order_calls: AtomicUsize::new(0),
                order_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_temp_order: true,
                ..Self::ok()
            }
        }
    }

    impl OrderBackend for &MockBackend {
        async fn create_temp_order(
            &self,
            _draft: &OrderDraft,
            _token: &PedidoToken,
        ) -> Result<TempOrderId, CmsError> {
            self.temp_order_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_temp_order {
                Err(CmsError::Api {
                    status: 500,
                    message: "backend down".to_string(),
                })
            } else {
                Ok(TempOrderId::new(7))
            }
        }

        async fn create_order(
            &self,
            _draft: &OrderDraft,
            _token: &PedidoToken,
        ) -> Result<OrderId, CmsError> {
            self.order_calls.fetch_add(1, Ordering::SeqCst);
            Ok(OrderId::new(99))
        }
    }

    struct MockGateway {
        status: PaymentStatus,
        preference_calls: AtomicUsize,
    }

    impl MockGateway {
        fn with_status(status: PaymentStatus) -> Self {
            Self {
                status,
                preference_calls: AtomicUsize::new(0),
            }
        }
    }

    impl PaymentGateway for &MockGateway {
        async fn create_preference(
            &self,
            _draft: &OrderDraft,
            _token: &PedidoToken,
            _back_urls: &BackUrls,
        ) -> Result<PaymentPreference, PaymentError> {
            self.preference_calls.fetch_add(1, Ordering::SeqCst);
            Ok(PaymentPreference {
                id: "pref-1".to_string(),
                init_point: "https://pay.example/pref-1".to_string(),
            })
        }

        async fn payment_status(&self, _payment_id: &str) -> Result<PaymentStatus, PaymentError> {
            Ok(self.status)
        }
    }

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            CartProduct {
                id: ProductId::new(1),
                slug: "tallarines".to_string(),
                name: "Tallarines".to_string(),
                price: Price::ars("1500".parse().unwrap()),
                unit: "kg".to_string(),
            },
            NonZeroU32::new(2).unwrap(),
        );
        cart
    }

    fn contact() -> CheckoutContact {
        CheckoutContact {
            name: "Ana".to_string(),
            phone: Phone::parse("1155550101").unwrap(),
            zone: "Centro".to_string(),
            address: "Mitre 1234".to_string(),
            note: None,
            user_id: None,
        }
    }

    fn back_urls() -> BackUrls {
        BackUrls::from_base_url("https://tiopelotte.shop")
    }

    #[tokio::test]
    async fn test_begin_happy_path_reaches_redirected() {
        let backend = MockBackend::ok();
        let gateway = MockGateway::with_status(PaymentStatus::Approved);
        let mut flow = CheckoutOrchestrator::new(&backend, &gateway);

        let (redirect, pending) = flow
            .begin(&cart_with_one_item(), &contact(), &back_urls())
            .await
            .unwrap();

        assert_eq!(flow.state(), CheckoutState::RedirectedToPayment);
        assert_eq!(redirect.init_point, "https://pay.example/pref-1");
        assert_eq!(pending.temp_order_id, TempOrderId::new(7));
        assert_eq!(pending.draft.total, "3000".parse().unwrap());
    }

    #[tokio::test]
    async fn test_failed_temp_order_never_reaches_preference() {
        let backend = MockBackend::failing();
        let gateway = MockGateway::with_status(PaymentStatus::Approved);
        let mut flow = CheckoutOrchestrator::new(&backend, &gateway);

        let result = flow
            .begin(&cart_with_one_item(), &contact(), &back_urls())
            .await;

        assert!(matches!(result, Err(CheckoutError::Backend(_))));
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert_eq!(backend.temp_order_calls.load(Ordering::SeqCst), 1);
        // The gateway was never consulted
        assert_eq!(gateway.preference_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_stays_idle() {
        let backend = MockBackend::ok();
        let gateway = MockGateway::with_status(PaymentStatus::Approved);
        let mut flow = CheckoutOrchestrator::new(&backend, &gateway);

        let result = flow.begin(&Cart::new(), &contact(), &back_urls()).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(ValidationError::EmptyCart))
        ));
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert_eq!(backend.temp_order_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_approved_confirmation_clears_cart() {
        let backend = MockBackend::ok();
        let gateway = MockGateway::with_status(PaymentStatus::Approved);
        let mut flow = CheckoutOrchestrator::new(&backend, &gateway);

        let mut cart = cart_with_one_item();
        let (_, pending) = flow.begin(&cart, &contact(), &back_urls()).await.unwrap();

        let order_id = flow
            .confirm(&mut cart, &pending, "pay-123")
            .await
            .unwrap();

        assert_eq!(order_id, OrderId::new(99));
        assert_eq!(flow.state(), CheckoutState::Confirmed);
        assert!(cart.is_empty());
        assert_eq!(backend.order_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_confirmation_keeps_cart() {
        let backend = MockBackend::ok();
        let gateway = MockGateway::with_status(PaymentStatus::Rejected);
        let mut flow = CheckoutOrchestrator::new(&backend, &gateway);

        let mut cart = cart_with_one_item();
        let (_, pending) = flow.begin(&cart, &contact(), &back_urls()).await.unwrap();

        let result = flow.confirm(&mut cart, &pending, "pay-123").await;

        assert!(matches!(
            result,
            Err(CheckoutError::NotApproved(PaymentStatus::Rejected))
        ));
        assert_eq!(flow.state(), CheckoutState::Failed);
        // The cart survives a failed confirmation
        assert!(!cart.is_empty());
        assert_eq!(backend.order_calls.load(Ordering::SeqCst), 0);
    }
}
