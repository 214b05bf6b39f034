//! Entry point that turns routes into requests.
//!
//! # Design
//! `Client` holds the base URL, an auth provider and a shared transport. It is
//! read-only after construction, so one instance can be shared (by reference
//! or clone) across every caller and concurrent task. Token retrieval is
//! delegated to the provider and only happens for routes that need auth.

use std::sync::Arc;

use url::Url;

use crate::auth::AuthProvider;
use crate::error::ApiError;
use crate::request::{Request, RequestBuilder};
use crate::route::Route;

#[derive(Clone)]
pub struct Client {
    base_url: String,
    auth: Arc<dyn AuthProvider>,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for `base_url`. Trailing slashes are stripped.
    ///
    /// Fails with [`ApiError::InvalidBaseUrl`] when the URL is empty or not an
    /// absolute URL.
    pub fn new(base_url: &str, auth: impl AuthProvider + 'static) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Self::with_http_client(base_url, Arc::new(auth), http)
    }

    /// Same as [`Client::new`], reusing an existing provider and transport.
    pub fn with_http_client(
        base_url: &str,
        auth: Arc<dyn AuthProvider>,
        http: reqwest::Client,
    ) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl("base URL is empty".to_string()));
        }
        Url::parse(trimmed).map_err(|e| ApiError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            auth,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request for `route`, leaving the builder open so callers can
    /// attach a response formatter.
    pub async fn request_builder<R>(&self, route: &R) -> Result<RequestBuilder, ApiError>
    where
        R: Route + ?Sized,
    {
        let mut builder = RequestBuilder::new().transport(self.http.clone());
        if route.needs_auth() {
            tracing::debug!(path = %route.path(), "fetching bearer token");
            builder = builder.jwt(self.auth.token().await?);
        }
        Ok(builder
            .url(format!("{}{}", self.base_url, route.path()))
            .method(route.method())
            .body(route.body()?))
    }

    pub async fn create_request<R>(&self, route: &R) -> Result<Request, ApiError>
    where
        R: Route + ?Sized,
    {
        Ok(self.request_builder(route).await?.build())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
