//! HTTP client for the business query service.
//!
//! Talks to the proxy, never to the upstream API directly: categories come
//! from `GET {base}/categories` and every business query is a GraphQL
//! document posted to `{base}/graphql`. Failed calls are returned as-is;
//! nothing is retried.

use std::time::Duration;

use bizsearch_core::{CategoryRecord, ResultBatch, SearchParams};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::normalize::favorites_batch;
use crate::query::{favorites_query, search_query, QueryObject};
use crate::types::{GraphQlResponse, SearchData};

const ACCEPT_LANGUAGE_VALUE: &str = "en_US";

/// Client for the proxy's `/categories` and `/graphql` endpoints.
///
/// Construct once at startup and share by reference.
pub struct QueryClient {
    client: Client,
    base_url: Url,
}

impl QueryClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the full category list.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not `[{alias, title}]`.
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>, ClientError> {
        let url = self.endpoint("categories")?;
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let categories: Vec<CategoryRecord> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        tracing::debug!(count = categories.len(), "fetched categories");
        Ok(categories)
    }

    /// Runs a business search.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx status.
    /// - [`ClientError::GraphQl`] if the service reports errors.
    /// - [`ClientError::Deserialize`] if `data.search` has the wrong shape.
    pub async fn search_businesses(&self, params: &SearchParams) -> Result<ResultBatch, ClientError> {
        let query = search_query(params);
        let data: SearchData = self
            .post_graphql(&query, || {
                format!(
                    "search(zip={}, offset={}, category={:?})",
                    params.zip_code, params.offset, params.category
                )
            })
            .await?;
        tracing::debug!(
            total = data.search.total,
            returned = data.search.business.len(),
            offset = params.offset,
            "search completed"
        );
        Ok(data.search)
    }

    /// Looks up businesses by id, preserving the order of `ids`.
    ///
    /// An empty `ids` slice yields an empty batch without a request.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx status.
    /// - [`ClientError::GraphQl`] if the service reports errors.
    /// - [`ClientError::Deserialize`] if an entry is not a business.
    pub async fn fetch_businesses_by_id(&self, ids: &[String]) -> Result<ResultBatch, ClientError> {
        if ids.is_empty() {
            return Ok(ResultBatch::default());
        }
        let query = favorites_query(ids);
        let data: serde_json::Map<String, serde_json::Value> = self
            .post_graphql(&query, || format!("favorites(count={})", ids.len()))
            .await?;
        favorites_batch(data, ids.len())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Posts a GraphQL document and deserializes its `data` member.
    ///
    /// `context` is only evaluated when an error needs describing.
    async fn post_graphql<T, F>(&self, query: &QueryObject, context: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> String,
    {
        let url = self.endpoint("graphql")?;
        let response = self
            .client
            .post(url)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .json(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let envelope: GraphQlResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: context(),
                source: e,
            })?;
        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ClientError::GraphQl(messages.join("; ")));
        }
        let data = envelope
            .data
            .ok_or_else(|| ClientError::GraphQl(format!("{}: response has no data", context())))?;

        serde_json::from_value(data).map_err(|e| ClientError::Deserialize {
            context: context(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
