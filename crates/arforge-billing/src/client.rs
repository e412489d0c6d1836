//! HTTP client for the billing proxy (`/api/polar`).
//!
//! Every response is parsed into an explicit result type or an `ActionError`
//! here, so callers never inspect raw JSON.

use crate::error::ActionError;
use crate::models::{CreateSubscriptionResult, PricesResult, SubscriptionResult};
use crate::traits::BillingBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BILLING_PATH: &str = "/api/polar";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `POST /api/polar` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest<'a> {
    action: &'a str,
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_id: Option<&'a str>,
}

/// Error body: `{"error": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BillingClient {
    client: Client,
    base_url: String,
}

impl BillingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: BILLING_API_URL, defaulting to the local app.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BILLING_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, BILLING_PATH)
    }

    /// GET the proxy with query parameters. Deserializes JSON response.
    async fn get<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T, ActionError> {
        let response = self.client.get(self.endpoint()).query(query).send().await?;
        let response = Self::check_status(response).await?;
        Self::parse(response).await
    }

    /// POST an action and return the successful response.
    async fn post_action(&self, body: &ActionRequest<'_>) -> Result<Response, ActionError> {
        let response = self.client.post(self.endpoint()).json(body).send().await?;
        Self::check_status(response).await
    }

    /// Turn a non-success response into `Rejected`, keeping the proxy's `error` message.
    async fn check_status(response: Response) -> Result<Response, ActionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.error);

        tracing::debug!(status = status.as_u16(), message = ?message, "Billing proxy rejected request");
        Err(ActionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ActionError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ActionError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl BillingBackend for BillingClient {
    async fn fetch_prices(&self) -> Result<PricesResult, ActionError> {
        self.get(&[("action", "prices")]).await
    }

    async fn fetch_subscription(&self, user_id: &str) -> Result<SubscriptionResult, ActionError> {
        self.get(&[("action", "subscription"), ("userId", user_id)])
            .await
    }

    async fn create_subscription(
        &self,
        user_id: &str,
        price_id: &str,
    ) -> Result<CreateSubscriptionResult, ActionError> {
        let response = self
            .post_action(&ActionRequest {
                action: "create_subscription",
                user_id,
                price_id: Some(price_id),
            })
            .await?;
        Self::parse(response).await
    }

    async fn cancel_subscription(&self, user_id: &str) -> Result<(), ActionError> {
        self.post_action(&ActionRequest {
            action: "cancel_subscription",
            user_id,
            price_id: None,
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_fetch_prices() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/polar")
            .match_query(Matcher::UrlEncoded("action".into(), "prices".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"prices":[{"id":"price_1","name":"Starter","description":"Monthly","amount":999,"currency":"USD","recurring":{"interval":"month"},"features":["10 AR Experiences"]}]}"#,
            )
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let result = client.fetch_prices().await.unwrap();

        assert_eq!(result.prices.len(), 1);
        assert_eq!(result.prices[0].amount, 999);
        assert_eq!(result.prices[0].recurring.interval, "month");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_prices_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/polar")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let err = client.fetch_prices().await.unwrap_err();
        assert!(matches!(err, ActionError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_subscription_sends_user_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/polar")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "subscription".into()),
                Matcher::UrlEncoded("userId".into(), "user-42".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"subscription":null}"#)
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let result = client.fetch_subscription("user-42").await.unwrap();

        assert!(result.subscription.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_subscription_posts_action() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/polar")
            .match_body(Matcher::Json(serde_json::json!({
                "action": "create_subscription",
                "userId": "user-42",
                "priceId": "price_pro"
            })))
            .with_status(200)
            .with_body(r#"{"client_secret":"pi_secret"}"#)
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let result = client
            .create_subscription("user-42", "price_pro")
            .await
            .unwrap();

        assert_eq!(result.client_secret.as_deref(), Some("pi_secret"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_keeps_proxy_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/polar")
            .with_status(400)
            .with_body(r#"{"error":"No active subscription"}"#)
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let err = client.cancel_subscription("user-42").await.unwrap_err();

        match err {
            ActionError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("No active subscription"));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/polar")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = BillingClient::new(server.url()).unwrap();
        let err = client.create_subscription("u", "p").await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::Rejected {
                status: 502,
                message: None
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = BillingClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_prices().await.unwrap_err();
        assert!(matches!(err, ActionError::Transport(_)));
    }
}
