//! Client for the upstream Yelp Fusion API.
//!
//! Holds the API key; every request carries `Authorization: Bearer <key>`.
//! Nothing here is retried.

use std::time::Duration;

use axum::body::Bytes;
use bizsearch_core::CategoryRecord;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// `GET /categories` response. Only alias and title are kept; parent and
/// country fields are dropped.
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<CategoryRecord>,
}

pub struct YelpUpstream {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl YelpUpstream {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetches every category, flattened to `{alias, title}`.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Status`] on a non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body has the wrong shape.
    pub async fn fetch_categories(&self, locale: &str) -> Result<Vec<CategoryRecord>, UpstreamError> {
        let url = self.endpoint("categories")?;
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .header(ACCEPT_LANGUAGE, locale)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }
        let body = response.text().await?;
        let envelope: CategoriesEnvelope =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(envelope.categories)
    }

    /// Forwards a GraphQL request body verbatim and returns the upstream
    /// status and body, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] only when no response was received.
    pub async fn forward_graphql(
        &self,
        body: Bytes,
        locale: &str,
    ) -> Result<(StatusCode, Bytes), UpstreamError> {
        let url = self.endpoint("graphql")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_LANGUAGE, locale)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body))
    }
}
