use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shoply_core::config::CatalogConfig;
use shoply_core::domain::product::Product;

use crate::errors::CatalogError;
use crate::wire::decode_products;

/// Seam between the loader and the transport, so the storefront session can
/// be driven by a scripted source in tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Human-readable origin for logs and diagnostics.
    fn origin(&self) -> String;
}

/// Fetches the product feed over HTTP. One GET, no auth, no pagination, no
/// retries; any failure is returned to the caller instead of being swallowed.
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
}

impl HttpCatalogSource {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self { client, endpoint: config.endpoint.clone() })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        decode_products(&body)
    }

    fn origin(&self) -> String {
        self.endpoint.clone()
    }
}
