//! HTTP client for the semantic search service
//!
//! The service exposes three GET endpoints: `/search`, `/insight` and
//! `/update`. [`SearchApi`] is the seam the results panel talks through, so
//! front ends and tests can swap the transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::error::PanelError;
use crate::model::{ErrorEnvelope, InsightResult, ReindexResponse, SearchQuery, SearchResultRow};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Operations the results panel needs from the search service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchApi: Send + Sync {
  /// Run a field-scoped search; the server returns at most a page of rows
  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>, PanelError>;

  /// Summarise a comma-joined list of resolutions
  async fn insight(&self, resolutions: &str) -> Result<InsightResult, PanelError>;

  /// Ask the server to rebuild its search index, returning its status message
  async fn reindex(&self) -> Result<String, PanelError>;
}

/// Configuration for the search service HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// Base URL of the search service (e.g., "http://localhost:5000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

/// reqwest-backed [`SearchApi`]
pub struct HttpSearchApi {
  client: Client,
  base: Url,
  timeout_secs: u64,
}

impl HttpSearchApi {
  pub fn with_config(config: ClientConfig) -> Result<Self, PanelError> {
    // A trailing slash keeps any path prefix when joining endpoint names
    let mut base_url = config.base_url.trim().to_string();
    if !base_url.ends_with('/') {
      base_url.push('/');
    }
    let base =
      Url::parse(&base_url).map_err(|e| PanelError::invalid_url(&config.base_url, e.to_string()))?;

    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| PanelError::request(base.as_str(), e))?;

    Ok(Self { client, base, timeout_secs: config.timeout_secs })
  }

  /// Build an endpoint URL with percent-encoded query parameters
  pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PanelError> {
    let mut url =
      self.base.join(path).map_err(|e| PanelError::invalid_url(self.base.as_str(), e.to_string()))?;

    if !params.is_empty() {
      let mut pairs = url.query_pairs_mut();
      for (key, value) in params {
        pairs.append_pair(key, value);
      }
    }

    Ok(url)
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, PanelError> {
    debug!(%url, "sending request");

    let request = self.client.get(url.clone()).send();
    let response = timeout(Duration::from_secs(self.timeout_secs), request)
      .await
      .map_err(|_| PanelError::timeout(url.as_str(), self.timeout_secs))?
      .map_err(|e| self.transport_error(&url, e))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| self.transport_error(&url, e))?;

    if !status.is_success() {
      return Err(PanelError::server(status.as_u16(), error_message(&body)));
    }

    serde_json::from_str(&body).map_err(|e| PanelError::decode(url.as_str(), e.to_string()))
  }

  fn transport_error(&self, url: &Url, error: reqwest::Error) -> PanelError {
    if error.is_timeout() {
      PanelError::timeout(url.as_str(), self.timeout_secs)
    } else {
      PanelError::request(url.as_str(), error)
    }
  }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>, PanelError> {
    let url = self.endpoint("search", &[(query.field.label(), query.text.as_str())])?;
    self.get_json(url).await
  }

  async fn insight(&self, resolutions: &str) -> Result<InsightResult, PanelError> {
    let url = self.endpoint("insight", &[("resolutions", resolutions)])?;
    self.get_json(url).await
  }

  async fn reindex(&self) -> Result<String, PanelError> {
    let url = self.endpoint("update", &[])?;
    let response: ReindexResponse = self.get_json(url).await?;
    Ok(response.message)
  }
}

/// Extract a readable message from an error response body
fn error_message(body: &str) -> String {
  if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
    return envelope.error;
  }

  let trimmed = body.trim();
  if trimmed.is_empty() {
    "no response body".to_string()
  } else {
    trimmed.to_string()
  }
}
