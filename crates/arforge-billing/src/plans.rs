//! Where the subscription page gets its plan list from.
//!
//! Production composes `FallbackPlanSource::new(RemotePlanSource, StaticPlanSource)`:
//! prices from the billing proxy, or the fixed table when the proxy fails.

use crate::error::ActionError;
use crate::models::{SubscriptionPlan, FREE_PLAN_ID};
use crate::traits::BillingBackend;
use async_trait::async_trait;
use std::sync::Arc;

/// Hosted checkout used by every paid plan of the fixed table.
pub const DEFAULT_CHECKOUT_URL: &str =
    "https://buy.polar.sh/polar_cl_tIJXTsoXdnxQRDa7GaT3JBFrWiJY3CTYZ0vkr2Mwj9d";

#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ActionError>;
}

/// Plans from the billing proxy's price list.
pub struct RemotePlanSource {
    backend: Arc<dyn BillingBackend>,
}

impl RemotePlanSource {
    pub fn new(backend: Arc<dyn BillingBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PlanSource for RemotePlanSource {
    async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ActionError> {
        let result = self.backend.fetch_prices().await?;
        Ok(result
            .prices
            .into_iter()
            .map(SubscriptionPlan::from_price)
            .collect())
    }
}

/// The fixed plan table. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPlanSource;

#[async_trait]
impl PlanSource for StaticPlanSource {
    async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ActionError> {
        Ok(default_plans())
    }
}

/// `primary`, or `secondary` when `primary` fails.
pub struct FallbackPlanSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackPlanSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: PlanSource, S: PlanSource> PlanSource for FallbackPlanSource<P, S> {
    async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ActionError> {
        match self.primary.plans().await {
            Ok(plans) => Ok(plans),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch plans, using fallback plan list");
                self.secondary.plans().await
            }
        }
    }
}

const STARTER_FEATURES: &[&str] = &[
    "10 AR Experiences",
    "Standard Analytics",
    "Email Support",
    "Custom Branding",
    "Advanced Templates",
    "Export Options",
];

const PRO_FEATURES: &[&str] = &[
    "Unlimited AR Experiences",
    "Advanced Analytics",
    "Priority Support",
    "Custom Branding",
    "API Access",
    "White-label Options",
    "Team Collaboration",
    "Custom Integrations",
];

struct PlanRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    amount: i64,
    interval: &'static str,
    features: &'static [&'static str],
    popular: bool,
    recommended: bool,
}

const DEFAULT_PLAN_ROWS: &[PlanRow] = &[
    PlanRow {
        id: FREE_PLAN_ID,
        name: "Free Plan",
        description: "Get started with AR experiences",
        amount: 0,
        interval: "month",
        features: &[
            "1 AR Experience",
            "Basic Analytics",
            "Community Support",
            "Standard Templates",
        ],
        popular: false,
        recommended: false,
    },
    PlanRow {
        id: "price_starter",
        name: "Starter Plan",
        description: "Perfect for growing creators",
        amount: 999,
        interval: "month",
        features: STARTER_FEATURES,
        popular: false,
        recommended: true,
    },
    PlanRow {
        id: "price_pro",
        name: "Professional Plan",
        description: "For businesses and agencies",
        amount: 4999,
        interval: "month",
        features: PRO_FEATURES,
        popular: true,
        recommended: false,
    },
    PlanRow {
        id: "price_starter_yearly",
        name: "Starter Plan (Yearly)",
        description: "Save 20% with annual billing",
        amount: 9999,
        interval: "year",
        features: STARTER_FEATURES,
        popular: false,
        recommended: false,
    },
    PlanRow {
        id: "price_pro_yearly",
        name: "Professional Plan (Yearly)",
        description: "Save 20% with annual billing",
        amount: 49999,
        interval: "year",
        features: PRO_FEATURES,
        popular: false,
        recommended: false,
    },
];

/// Free, starter, and pro monthly, then starter and pro yearly. Amounts in cents, USD.
pub fn default_plans() -> Vec<SubscriptionPlan> {
    DEFAULT_PLAN_ROWS
        .iter()
        .map(|row| SubscriptionPlan {
            id: row.id.to_string(),
            name: row.name.to_string(),
            description: row.description.to_string(),
            amount: row.amount,
            currency: "USD".to_string(),
            interval: row.interval.to_string(),
            features: row.features.iter().map(|f| f.to_string()).collect(),
            popular: row.popular,
            recommended: row.recommended,
            // The free tier activates locally and has no checkout.
            checkout_url: (row.id != FREE_PLAN_ID).then(|| DEFAULT_CHECKOUT_URL.to_string()),
        })
        .collect()
}
