//! Request executor for the Zephyr Scale REST API.
//!
//! Every tool funnels through [`ZephyrClient::send`], which owns the only
//! shared contract in the server: fixed headers and timeout, a single
//! transport attempt, and normalization of the response into an [`Outcome`].

use std::str::FromStr;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::payload::Params;

/// Result of one executor call: decoded JSON, the `{"success": true}`
/// marker for empty bodies, or an error.
pub type Outcome = Result<Value, ApiError>;

/// HTTP methods understood by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only POST and PUT send a JSON body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ApiError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Zephyr Scale API client.
#[derive(Clone)]
pub struct ZephyrClient {
    config: Arc<Config>,
    http_client: Client,
}

impl ZephyrClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns `ApiError::HttpClientInit` if the HTTP client cannot be created.
    pub fn new(config: Arc<Config>) -> Result<Self, ApiError> {
        // 3xx must surface as an HTTP error, not be followed
        let http_client = Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::none())
            .build()
            .map_err(|e| ApiError::HttpClientInit(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a fully qualified URL from a path relative to the API base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url(), path)
    }

    /// Execute one request.
    ///
    /// Method names coming from outside are parsed into [`HttpMethod`] first,
    /// so an unsupported method fails before any network activity.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
        query: Option<&Params>,
    ) -> Outcome {
        let outcome = self.dispatch(method, url, body, query).await;
        if let Err(ref e) = outcome {
            match e.status_code() {
                Some(status) => {
                    tracing::error!(method = method.as_str(), url = %url, status, "API error: {}", e)
                }
                None => tracing::error!(method = method.as_str(), url = %url, "{}", e),
            }
        }
        outcome
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
        query: Option<&Params>,
    ) -> Outcome {
        tracing::debug!(method = method.as_str(), url = %url, "Zephyr API request");

        let mut request = self
            .http_client
            .request(method.into(), url)
            .header(AUTHORIZATION, self.config.token.header_value())
            .header(CONTENT_TYPE, "application/json");

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(&query.to_query_pairs());
        }

        if method.carries_body() {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(status = status.as_u16(), "Failed to read error body: {}", e);
                    String::new()
                }
            };
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Zephyr API response");

        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(json!({ "success": true }));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for ZephyrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZephyrClient")
            .field("base_url", &self.config.api_base_url())
            .field("timeout", &self.config.timeout())
            .finish()
    }
}
