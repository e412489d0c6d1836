//! Seams between the subscription controller and the outside world.

use crate::error::ActionError;
use crate::models::{CreateSubscriptionResult, PricesResult, SubscriptionResult};
use async_trait::async_trait;

/// Calls on the billing proxy.
#[async_trait]
pub trait BillingBackend: Send + Sync {
    async fn fetch_prices(&self) -> Result<PricesResult, ActionError>;

    async fn fetch_subscription(&self, user_id: &str) -> Result<SubscriptionResult, ActionError>;

    async fn create_subscription(
        &self,
        user_id: &str,
        price_id: &str,
    ) -> Result<CreateSubscriptionResult, ActionError>;

    async fn cancel_subscription(&self, user_id: &str) -> Result<(), ActionError>;
}

/// Transient success/error toasts.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Opens the hosted checkout in a new window.
pub trait CheckoutLauncher: Send + Sync {
    fn open(&self, url: &str);
}

/// Blocking yes/no prompt.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}
