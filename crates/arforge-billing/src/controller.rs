//! Subscription page controller.
//!
//! Owns the page state (`Loading` -> `Unauthenticated` | `Loaded`) and turns
//! user actions into billing proxy calls. Every failure ends as a notification;
//! nothing here returns an error to the caller.

use crate::models::{Session, SubscriptionPlan, UserSubscription};
use crate::plans::{FallbackPlanSource, PlanSource, RemotePlanSource, StaticPlanSource};
use crate::traits::{BillingBackend, CheckoutLauncher, Confirmer, Notifier};
use std::sync::Arc;

pub const ACCESS_REQUIRED_TITLE: &str = "Access Required";
pub const ACCESS_REQUIRED_MESSAGE: &str = "Please sign in to view subscription options";
pub const SIGN_IN_HREF: &str = "/auth/signin";

pub const CANCEL_CONFIRMATION: &str = "Are you sure you want to cancel your subscription? You will lose access to premium features at the end of your current billing period.";

const SIGN_IN_TO_SUBSCRIBE: &str = "Please sign in to subscribe";
const FREE_PLAN_ACTIVATED: &str = "Free plan activated!";
const OPENING_CHECKOUT: &str = "Opening Polar.sh checkout...";
const REDIRECTING_TO_PAYMENT: &str = "Redirecting to payment...";
const SUBSCRIPTION_CREATED: &str = "Subscription created successfully!";
const CREATE_FAILED: &str = "Failed to create subscription";
const SUBSCRIPTION_CANCELED: &str = "Subscription canceled successfully";
const CANCEL_FAILED: &str = "Failed to cancel subscription";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Unauthenticated,
    Loaded,
}

/// What the page renders for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Spinner,
    AccessRequired {
        title: &'static str,
        message: &'static str,
        sign_in_href: &'static str,
    },
    Plans {
        current: Option<UserSubscription>,
        plans: Vec<SubscriptionPlan>,
    },
}

/// UI collaborators the controller reports to
#[derive(Clone)]
pub struct PageSeams {
    pub notifier: Arc<dyn Notifier>,
    pub checkout: Arc<dyn CheckoutLauncher>,
    pub confirmer: Arc<dyn Confirmer>,
}

pub struct SubscriptionController {
    backend: Arc<dyn BillingBackend>,
    plan_source: Arc<dyn PlanSource>,
    seams: PageSeams,
    state: LoadState,
    session: Option<Session>,
    plans: Vec<SubscriptionPlan>,
    current: Option<UserSubscription>,
    subscribing: bool,
}

impl SubscriptionController {
    /// Controller listing the proxy's prices, falling back to the fixed plan table.
    pub fn new(backend: Arc<dyn BillingBackend>, seams: PageSeams) -> Self {
        let plan_source = Arc::new(FallbackPlanSource::new(
            RemotePlanSource::new(backend.clone()),
            StaticPlanSource,
        ));
        Self::with_plan_source(backend, plan_source, seams)
    }

    pub fn with_plan_source(
        backend: Arc<dyn BillingBackend>,
        plan_source: Arc<dyn PlanSource>,
        seams: PageSeams,
    ) -> Self {
        Self {
            backend,
            plan_source,
            seams,
            state: LoadState::Loading,
            session: None,
            plans: Vec::new(),
            current: None,
            subscribing: false,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    pub fn current_subscription(&self) -> Option<&UserSubscription> {
        self.current.as_ref()
    }

    /// Mirrors the page's subscribing state. It is set only for the duration of
    /// the proxy call inside `subscribe`, which holds `&mut self`, so callers
    /// always observe it cleared.
    pub fn is_subscribing(&self) -> bool {
        self.subscribing
    }

    /// Resolve the page for `session`. Without a session nothing is fetched.
    pub async fn load(&mut self, session: Option<Session>) {
        self.state = LoadState::Loading;
        self.session = session;

        let Some(session) = self.session.clone() else {
            self.plans.clear();
            self.current = None;
            self.state = LoadState::Unauthenticated;
            return;
        };

        let (plans, subscription) = tokio::join!(
            self.plan_source.plans(),
            self.backend.fetch_subscription(&session.user_id)
        );

        self.plans = match plans {
            Ok(plans) => plans,
            Err(e) => {
                tracing::error!(error = %e, "No plan list available");
                Vec::new()
            }
        };

        match subscription {
            Ok(result) => {
                self.current = result.subscription.map(UserSubscription::from_record);
            }
            Err(e) => {
                tracing::warn!(error = %e, user_id = %session.user_id, "Failed to fetch subscription");
                self.current = None;
            }
        }

        self.state = LoadState::Loaded;
    }

    pub fn view(&self) -> PageView {
        match self.state {
            LoadState::Loading => PageView::Spinner,
            LoadState::Unauthenticated => PageView::AccessRequired {
                title: ACCESS_REQUIRED_TITLE,
                message: ACCESS_REQUIRED_MESSAGE,
                sign_in_href: SIGN_IN_HREF,
            },
            LoadState::Loaded => PageView::Plans {
                current: self.current.clone(),
                plans: self.plans.clone(),
            },
        }
    }

    /// Start a subscription to `plan`: free tier locally, hosted checkout when the
    /// plan has a link, otherwise through the proxy.
    pub async fn subscribe(&mut self, plan: &SubscriptionPlan) {
        let Some(session) = self.session.clone() else {
            self.seams.notifier.error(SIGN_IN_TO_SUBSCRIBE);
            return;
        };

        if plan.is_free() {
            self.seams.notifier.success(FREE_PLAN_ACTIVATED);
            return;
        }

        if let Some(url) = plan.checkout_url.as_deref() {
            tracing::info!(plan_id = %plan.id, "Opening hosted checkout");
            self.seams.checkout.open(url);
            self.seams.notifier.success(OPENING_CHECKOUT);
            return;
        }

        self.subscribing = true;
        let result = self
            .backend
            .create_subscription(&session.user_id, &plan.id)
            .await;
        self.subscribing = false;

        match result {
            Ok(created) if created.client_secret.is_some() => {
                self.seams.notifier.success(REDIRECTING_TO_PAYMENT);
            }
            Ok(_) => {
                self.seams.notifier.success(SUBSCRIPTION_CREATED);
                self.refresh_subscription().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, plan_id = %plan.id, "Subscription creation failed");
                self.seams.notifier.error(e.user_message(CREATE_FAILED));
            }
        }
    }

    /// Cancel the current subscription after the user confirms.
    pub async fn cancel(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if self.current.is_none() {
            return;
        }
        if !self.seams.confirmer.confirm(CANCEL_CONFIRMATION) {
            return;
        }

        match self.backend.cancel_subscription(&session.user_id).await {
            Ok(()) => {
                self.seams.notifier.success(SUBSCRIPTION_CANCELED);
                self.refresh_subscription().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Subscription cancellation failed");
                self.seams.notifier.error(e.user_message(CANCEL_FAILED));
            }
        }
    }

    /// Re-read the current subscription. A failed read keeps what is shown.
    pub async fn refresh_subscription(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        match self.backend.fetch_subscription(&session.user_id).await {
            Ok(result) => {
                self.current = result.subscription.map(UserSubscription::from_record);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh subscription");
            }
        }
    }
}
