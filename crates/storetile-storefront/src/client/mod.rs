//! HTTP client for the Storefront GraphQL API.

mod endpoint;

use std::time::Duration;

use reqwest::Client;
use storetile_core::StorefrontConfig;

use crate::error::StorefrontError;
use crate::query::{CollectionQuery, GraphQlRequest, COLLECTION_PRODUCTS_QUERY};
use crate::types::{CollectionProductsData, GraphQlResponse, RawProduct};

pub use endpoint::{ensure_starts_with, graphql_endpoint};

/// Header carrying the public Storefront access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Fetches catalog data from one store's Storefront API.
///
/// Each call is a single POST with no retry: any failure is final for that
/// call and surfaces as a typed [`StorefrontError`].
pub struct StorefrontClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl StorefrontClient {
    /// Creates a client for `store_domain` with the given timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidEndpoint`] if the domain does not form a URL.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client` cannot
    ///   be constructed (e.g., invalid TLS config).
    pub fn new(
        store_domain: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let endpoint = graphql_endpoint(store_domain, api_version)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    /// Creates a client from validated startup configuration.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        Self::new(
            &config.store_domain,
            &config.api_version,
            &config.access_token,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches up to 100 products of the collection named by `query.handle`.
    ///
    /// A collection that does not exist yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::UnexpectedStatus`]: any non-2xx status.
    /// - [`StorefrontError::Http`]: network or TLS failure.
    /// - [`StorefrontError::Deserialize`]: body is not the expected JSON.
    /// - [`StorefrontError::GraphQl`]: the API answered with errors and no data.
    pub async fn fetch_collection_products(
        &self,
        query: &CollectionQuery,
    ) -> Result<Vec<RawProduct>, StorefrontError> {
        let data: CollectionProductsData = self
            .execute(COLLECTION_PRODUCTS_QUERY, query, "collection products")
            .await?;

        let Some(collection) = data.collection else {
            tracing::warn!(handle = %query.handle, "no collection found");
            return Ok(Vec::new());
        };

        tracing::info!(
            handle = %query.handle,
            products = collection.products.len(),
            "fetched collection products"
        );
        Ok(collection.products)
    }

    async fn execute<V, T>(
        &self,
        query: &str,
        variables: &V,
        context: &str,
    ) -> Result<T, StorefrontError>
    where
        V: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<GraphQlResponse<T>>(&body).map_err(|e| {
            StorefrontError::Deserialize {
                context: context.to_owned(),
                source: e,
            }
        })?;

        match parsed.data {
            Some(data) => {
                for error in &parsed.errors {
                    tracing::warn!(context, message = %error.message, "partial GraphQL error");
                }
                Ok(data)
            }
            None => Err(StorefrontError::GraphQl {
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
