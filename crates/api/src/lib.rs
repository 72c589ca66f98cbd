//! Verdant API client utilities.
//!
//! This crate provides a lightweight client for the Verdant products backend.
//! It focuses on:
//!
//! - Constructing an HTTP client from an explicit [`ClientConfig`]
//! - Validating the configured base URL
//! - Attaching `Authorization: Bearer <token>` once a token is known
//! - Decoding JSON bodies into typed [`ApiResponse`] values
//!
//! Authorization is owned by the client value. There is no process-wide
//! header map: a call site that needs a different token either updates its
//! own client with [`VerdantClient::set_auth_token`] or derives a new one
//! with [`VerdantClient::with_auth_token`].
//!
//! # Example
//!
//! ```ignore
//! use verdant_api::{ClientConfig, VerdantClient};
//! use verdant_types::Product;
//!
//! async fn popular() -> Result<Vec<Product>, verdant_api::NetworkError> {
//!     let mut client = VerdantClient::new(ClientConfig::new("http://127.0.0.1:3000"))?;
//!     client.set_auth_token("abc");
//!     Ok(client.get::<Vec<Product>>("/products/most-popular").await?.data)
//! }
//! ```

mod error;
mod products;

use std::env;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use error::{NetworkError, status_error_message};
pub use products::{MOST_POPULAR_PATH, MOST_SUSTAINABLE_PATH, ProductCatalog, fetch_home_collections};

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Explicit configuration handed to [`VerdantClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Decoded body plus the HTTP status it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

/// Thin wrapper around a configured `reqwest::Client`.
///
/// Cloning is cheap: clones share the underlying connection pool but own
/// their configuration, so a token change on one clone is invisible to the
/// others.
#[derive(Debug, Clone)]
pub struct VerdantClient {
    config: ClientConfig,
    base_url: Url,
    http: Client,
    user_agent: String,
}

impl VerdantClient {
    /// Build a client for `config`, rejecting unusable base URLs.
    pub fn new(config: ClientConfig) -> Result<Self, NetworkError> {
        let base_url = validate_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(NetworkError::Transport)?;

        Ok(Self {
            config,
            base_url,
            http,
            user_agent: format!("verdant/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_auth_token(&self) -> bool {
        self.config.auth_token.is_some()
    }

    /// Overwrite the token used by every subsequent request from this client.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.config.auth_token = Some(token.into());
    }

    /// Derive a client that authenticates with `token`, leaving `self` untouched.
    pub fn with_auth_token(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.set_auth_token(token);
        client
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    ///
    /// The request carries the User-Agent, `Accept: application/json` and,
    /// when configured, the bearer token.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        debug!(%method, %url, "building request");

        let builder = self
            .http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "application/json");
        match self.config.auth_token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, NetworkError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, NetworkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, NetworkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, NetworkError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>, NetworkError> {
        let response = builder.send().await.map_err(|error| {
            warn!(%error, "request failed before a response arrived");
            NetworkError::from_transport(error)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(NetworkError::from_transport)?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "backend returned an error status");
            return Err(NetworkError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        let data = serde_json::from_str(body).inspect_err(|error| warn!(%error, "failed to decode response body"))?;
        Ok(ApiResponse {
            data,
            status: status.as_u16(),
        })
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - it must parse as an absolute URL
/// - it must include a host
/// - the scheme must be `http` or `https`
fn validate_base_url(base: &str) -> Result<Url, NetworkError> {
    let invalid = |reason: String| NetworkError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };

    let parsed_base_url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if parsed_base_url.host_str().is_none() {
        return Err(invalid("a host is required".into()));
    }
    if !matches!(parsed_base_url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}://'", parsed_base_url.scheme())));
    }
    Ok(parsed_base_url)
}
