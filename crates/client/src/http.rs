//! reqwest-backed implementation of [`StorefrontApi`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use storefront_catalog::ProductRecord;
use storefront_core::{CartItemId, ProductId, Quantity};

use crate::api::{AddToCartResponse, QuantityBody, StorefrontApi, UpdateCartResponse};
use crate::config::ClientConfig;
use crate::outcome::CallOutcome;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client for the storefront endpoints.
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpStorefrontClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request`, retrying per the configured policy.
    async fn execute<T>(&self, label: &str, request: reqwest::RequestBuilder) -> CallOutcome<T>
    where
        T: DeserializeOwned,
    {
        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            let Some(cloned) = request.try_clone() else {
                return CallOutcome::TransportError("request body cannot be replayed".to_string());
            };

            let outcome = Self::send_once(cloned).await;
            if !outcome.is_retryable() || attempt >= retry.max_retries {
                if attempt > 0 {
                    tracing::debug!(call = label, attempts = attempt + 1, "giving up retries");
                }
                return outcome;
            }

            attempt += 1;
            let delay = retry.backoff(attempt);
            tracing::warn!(
                call = label,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "storefront call failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once<T>(request: reqwest::RequestBuilder) -> CallOutcome<T>
    where
        T: DeserializeOwned,
    {
        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                return CallOutcome::TransportError(format!("request timed out: {e}"));
            }
            Err(e) => return CallOutcome::TransportError(e.to_string()),
        };

        let status = resp.status();
        if !status.is_success() {
            return CallOutcome::ServerError {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            };
        }

        match resp.json::<T>().await {
            Ok(body) => CallOutcome::Success(body),
            Err(e) => CallOutcome::TransportError(format!("invalid response body: {e}")),
        }
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontClient {
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> CallOutcome<AddToCartResponse> {
        let url = self.config.url(&format!("/add_to_cart/{product_id}"));
        let request = self.http.post(&url).json(&QuantityBody {
            quantity: quantity.get(),
        });
        self.execute("add_to_cart", request).await
    }

    async fn update_cart_item(
        &self,
        cart_item_id: CartItemId,
        quantity: u64,
    ) -> CallOutcome<UpdateCartResponse> {
        let url = self.config.url(&format!("/update_cart/{cart_item_id}"));
        let request = self.http.post(&url).json(&QuantityBody { quantity });
        self.execute("update_cart_item", request).await
    }

    async fn fetch_product(&self, product_id: ProductId) -> CallOutcome<ProductRecord> {
        let url = self.config.url(&format!("/admin/product/{product_id}"));
        self.execute("fetch_product", self.http.get(&url)).await
    }
}
