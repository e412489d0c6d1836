//! Billing side of ARForge.
//!
//! Provides a client for the billing proxy (`/api/polar`, fronting Polar.sh),
//! the plan sources behind the pricing table, and the subscription page
//! controller that ties them to the UI through small traits.

pub mod client;
pub mod controller;
pub mod error;
pub mod models;
pub mod plans;
pub mod traits;

pub use client::BillingClient;
pub use controller::{LoadState, PageSeams, PageView, SubscriptionController};
pub use error::ActionError;
pub use models::{
    CreateSubscriptionResult, PriceRecord, PricesResult, Session, SubscriptionPlan,
    SubscriptionRecord, SubscriptionResult, UserSubscription,
};
pub use plans::{default_plans, FallbackPlanSource, PlanSource, RemotePlanSource, StaticPlanSource};
pub use traits::{BillingBackend, CheckoutLauncher, Confirmer, Notifier};
