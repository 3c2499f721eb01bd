//! HTTP transport for the Companies House API
//!
//! The client never talks to reqwest directly; it goes through [`Transport`]
//! so tests can hand it canned JSON instead of a live connection.

use crate::config::ClientConfig;
use crate::error::{CompaniesHouseError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// A single-request GET capability
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given query parameters and decode the body as JSON
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value>;

    /// GET `url` and return the raw body, asking for the `accept` media type
    async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        (**self).get_json(url, params).await
    }

    async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>> {
        (**self).get_bytes(url, accept).await
    }
}

/// Live transport backed by a reqwest client
pub struct ReqwestTransport {
    http: Client,
    api_key: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CompaniesHouseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
        })
    }

    async fn send(&self, url: Url, accept: &str) -> Result<reqwest::Response> {
        let mut request = self.http.get(url.clone()).header(ACCEPT, accept);
        if let Some(key) = &self.api_key {
            request = request.basic_auth(key, Option::<&str>::None);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CompaniesHouseError::request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Companies House request failed");
            return Err(CompaniesHouseError::status(status.as_u16(), &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let full_url = build_url(url, params)?;
        debug!(url = %full_url, "GET json");

        let body = self
            .send(full_url, "application/json")
            .await?
            .bytes()
            .await
            .map_err(|e| CompaniesHouseError::request(url, e))?;

        serde_json::from_slice(&body).map_err(|e| CompaniesHouseError::parse(url, e))
    }

    async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>> {
        let full_url = build_url(url, &[])?;
        debug!(url = %full_url, accept, "GET bytes");

        let body = self
            .send(full_url, accept)
            .await?
            .bytes()
            .await
            .map_err(|e| CompaniesHouseError::request(url, e))?;

        Ok(body.to_vec())
    }
}

/// Parse `url` and append `params` as an encoded query string
pub(crate) fn build_url(url: &str, params: &[(&str, String)]) -> Result<Url> {
    let mut parsed = Url::parse(url).map_err(|e| CompaniesHouseError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !params.is_empty() {
        parsed
            .query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }

    Ok(parsed)
}
