//! Billing proxy payloads and the display models derived from them.
//!
//! Wire types (`*Record`, `*Result`) mirror the JSON the proxy sends and are
//! parsed at the client boundary. Display types (`SubscriptionPlan`,
//! `UserSubscription`) are what the subscription page renders.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier of the plan that activates without any billing call.
pub const FREE_PLAN_ID: &str = "price_free";

/// Hosted checkout for prices without their own link.
pub const CHECKOUT_BASE_URL: &str = "https://buy.polar.sh";

/// Monthly prices at or above this amount (minor units) are badged popular.
const POPULAR_MIN_AMOUNT: i64 = 4999;
/// Monthly prices from this amount up to the popular threshold are badged recommended.
const RECOMMENDED_MIN_AMOUNT: i64 = 999;

const MONTHLY: &str = "month";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: String,
}

/// One entry of `GET /api/polar?action=prices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Minor currency units (cents)
    pub amount: i64,
    pub currency: String,
    pub recurring: Recurring,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricesResult {
    pub prices: Vec<PriceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Body of `GET /api/polar?action=subscription`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubscriptionResult {
    #[serde(default)]
    pub subscription: Option<SubscriptionRecord>,
}

/// Body of a successful `create_subscription` action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateSubscriptionResult {
    /// Present when the provider still needs a payment confirmation
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// A pricing plan as shown on the subscription page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Minor currency units (cents)
    pub amount: i64,
    pub currency: String,
    pub interval: String,
    pub features: Vec<String>,
    pub popular: bool,
    pub recommended: bool,
    /// Hosted checkout page; `None` means subscribe through the proxy
    pub checkout_url: Option<String>,
}

impl SubscriptionPlan {
    /// Badge a remote price and give it a checkout link.
    pub fn from_price(price: PriceRecord) -> Self {
        let monthly = price.recurring.interval == MONTHLY;
        let popular = monthly && price.amount >= POPULAR_MIN_AMOUNT;
        let recommended = monthly
            && price.amount >= RECOMMENDED_MIN_AMOUNT
            && price.amount < POPULAR_MIN_AMOUNT;
        let checkout_url = price
            .checkout_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("{}/{}", CHECKOUT_BASE_URL, price.id));

        Self {
            id: price.id,
            name: price.name,
            description: price.description,
            amount: price.amount,
            currency: price.currency,
            interval: price.recurring.interval,
            features: price.features,
            popular,
            recommended,
            checkout_url: Some(checkout_url),
        }
    }

    pub fn is_free(&self) -> bool {
        self.id == FREE_PLAN_ID
    }

    /// Amount in major units, e.g. `9.99` for 999 cents.
    pub fn display_amount(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// The signed-in user's subscription as shown on the subscription page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSubscription {
    pub id: String,
    pub status: String,
    pub plan_name: String,
    pub features: Vec<String>,
    pub current_period_end: Option<String>,
    pub is_active: bool,
}

impl UserSubscription {
    pub fn from_record(record: SubscriptionRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            plan_name: record
                .plan_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown Plan".to_string()),
            features: record.features.unwrap_or_default(),
            current_period_end: record.current_period_end,
            is_active: record.is_active,
        }
    }

    /// Status with its first letter capitalized (`active` -> `Active`).
    pub fn status_label(&self) -> String {
        let mut chars = self.status.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Calendar date of the period end, if the proxy sent a parsable one.
    pub fn renewal_date(&self) -> Option<NaiveDate> {
        let raw = self.current_period_end.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// An authenticated user as seen by the subscription page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(id: &str, amount: i64, interval: &str) -> PriceRecord {
        PriceRecord {
            id: id.to_string(),
            name: "Plan".to_string(),
            description: String::new(),
            amount,
            currency: "USD".to_string(),
            recurring: Recurring {
                interval: interval.to_string(),
            },
            features: vec![],
            checkout_url: None,
        }
    }

    #[test]
    fn test_badges_follow_monthly_thresholds() {
        let starter = SubscriptionPlan::from_price(price("p1", 999, "month"));
        assert!(starter.recommended);
        assert!(!starter.popular);

        let pro = SubscriptionPlan::from_price(price("p2", 4999, "month"));
        assert!(pro.popular);
        assert!(!pro.recommended);

        let cheap = SubscriptionPlan::from_price(price("p3", 998, "month"));
        assert!(!cheap.popular && !cheap.recommended);

        let yearly = SubscriptionPlan::from_price(price("p4", 49999, "year"));
        assert!(!yearly.popular && !yearly.recommended);
    }

    #[test]
    fn test_checkout_url_defaults_to_price_id() {
        let plan = SubscriptionPlan::from_price(price("price_abc", 999, "month"));
        assert_eq!(plan.checkout_url.as_deref(), Some("https://buy.polar.sh/price_abc"));

        let mut with_link = price("price_abc", 999, "month");
        with_link.checkout_url = Some("https://buy.polar.sh/polar_cl_custom".to_string());
        let plan = SubscriptionPlan::from_price(with_link);
        assert_eq!(plan.checkout_url.as_deref(), Some("https://buy.polar.sh/polar_cl_custom"));
    }

    #[test]
    fn test_display_amount() {
        let mut plan = SubscriptionPlan::from_price(price("p", 999, "month"));
        assert_eq!(plan.display_amount(), "9.99");
        plan.amount = 0;
        assert_eq!(plan.display_amount(), "0.00");
        plan.amount = 49999;
        assert_eq!(plan.display_amount(), "499.99");
    }

    #[test]
    fn test_subscription_defaults() {
        let record: SubscriptionRecord =
            serde_json::from_str(r#"{"id":"sub_1","status":"active","is_active":true}"#).unwrap();
        let sub = UserSubscription::from_record(record);
        assert_eq!(sub.plan_name, "Unknown Plan");
        assert!(sub.features.is_empty());
        assert_eq!(sub.status_label(), "Active");
        assert_eq!(sub.renewal_date(), None);
    }

    #[test]
    fn test_renewal_date_formats() {
        let mut sub = UserSubscription::from_record(SubscriptionRecord {
            id: "sub_1".to_string(),
            status: "past_due".to_string(),
            plan_name: Some("Starter Plan".to_string()),
            features: None,
            current_period_end: Some("2026-11-14T08:30:00Z".to_string()),
            is_active: false,
        });
        assert_eq!(sub.renewal_date(), NaiveDate::from_ymd_opt(2026, 11, 14));
        assert_eq!(sub.status_label(), "Past_due");

        sub.current_period_end = Some("2027-01-02".to_string());
        assert_eq!(sub.renewal_date(), NaiveDate::from_ymd_opt(2027, 1, 2));

        sub.current_period_end = Some("next month".to_string());
        assert_eq!(sub.renewal_date(), None);
    }

    #[test]
    fn test_price_without_recurring_is_rejected() {
        let parsed = serde_json::from_str::<PricesResult>(
            r#"{"prices":[{"id":"p","name":"n","amount":1,"currency":"USD"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
