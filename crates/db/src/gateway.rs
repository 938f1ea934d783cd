//! REST gateway to the hosted relational backend.
//!
//! [`RestGateway`] is the only component that knows the wire format: the
//! `/rest/v1/` prefix, the `apikey` + bearer headers, and the
//! `Prefer: return=representation` hint on mutating calls. Status codes are
//! returned uninterpreted; deciding which ones mean success is up to the
//! repositories.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::error::StoreError;

/// Path prefix of the REST interface on the hosted backend.
pub const REST_PREFIX: &str = "rest/v1";

/// Per-call timeout. A single attempt is made; there are no retries.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw outcome of a remote store call.
#[derive(Debug, Clone)]
pub struct StoreResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl StoreResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text for logging; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can execute a REST call against the store.
///
/// `resource` is a table name optionally followed by a query string of
/// filter expressions (`nodes?workspace_id=eq.<id>`); it is passed through
/// verbatim.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        resource: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<StoreResponse, StoreError>;
}

/// HTTPS client for the hosted store.
///
/// The base URL is parsed once at construction. An empty base URL is
/// accepted here; every call through it fails with
/// [`StoreError::Configuration`] before any request is made.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: Option<Url>,
    api_key: String,
}

impl RestGateway {
    /// Build a gateway with its own HTTP client using [`REQUEST_TIMEOUT`].
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_client(client, base_url, api_key)
    }

    /// Build a gateway around an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Full URL for a resource path: `<base>/rest/v1/<resource>`.
    pub fn endpoint(&self, resource: &str) -> Result<Url, StoreError> {
        let base = self.base_url.as_ref().ok_or_else(|| {
            StoreError::Configuration("remote store base URL is empty".into())
        })?;
        let relative = format!("{REST_PREFIX}/{}", resource.trim_start_matches('/'));
        base.join(&relative).map_err(|e| {
            StoreError::Configuration(format!("invalid resource path '{resource}': {e}"))
        })
    }
}

/// Parse the base URL. The stored path always ends in `/`.
fn parse_base_url(raw: &str) -> Result<Option<Url>, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let mut url = Url::parse(raw).map_err(|e| {
        StoreError::Configuration(format!("invalid remote store base URL '{raw}': {e}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(StoreError::Configuration(format!(
            "remote store base URL '{raw}' cannot carry a path"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(Some(url))
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PATCH | Method::PUT | Method::DELETE
    )
}

#[async_trait]
impl RemoteStore for RestGateway {
    async fn execute(
        &self,
        method: Method,
        resource: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<StoreResponse, StoreError> {
        let url = self.endpoint(resource)?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json");

        if is_mutating(&method) {
            request = request.header("Prefer", "return=representation");
        }
        if let Some(payload) = body {
            request = request.body(serde_json::to_vec(payload)?);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%method, resource, error = %e, "Remote store request failed");
            StoreError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        tracing::debug!(%method, resource, status, "Remote store call completed");

        Ok(StoreResponse::new(status, bytes.to_vec()))
    }
}
