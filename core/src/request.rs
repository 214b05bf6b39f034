//! Bound, single-shot requests and the builder that assembles them.
//!
//! # Design
//! A `Request` is a snapshot: URL, method, optional bearer token, optional
//! body and an optional response formatter. `headers()` computes what will go
//! on the wire without I/O; `invoke()` performs exactly one call. There is no
//! retry, no timeout beyond the transport's own defaults, and no
//! cancellation.

use std::fmt;
use std::sync::Arc;

use tracing::{instrument, Span};

use crate::error::ApiError;
use crate::http::{Body, Decoded, HttpMethod};

/// Post-processing applied to a decoded response body.
pub type Formatter = Arc<dyn Fn(Decoded) -> Decoded + Send + Sync>;

/// A materialized API call. Built by [`RequestBuilder`], usually through
/// `Client::create_request`.
#[derive(Clone)]
pub struct Request {
    url: String,
    method: HttpMethod,
    jwt: Option<String>,
    body: Option<Body>,
    formatter: Option<Formatter>,
    http: Option<reqwest::Client>,
}

impl Request {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Headers this request adds on its own. Multipart bodies get their
    /// `Content-Type` (with boundary) from the transport.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if matches!(self.body, Some(Body::Json(_))) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(jwt) = &self.jwt {
            headers.push(("Authorization".to_string(), format!("Bearer {jwt}")));
        }
        headers
    }

    /// Perform the call and decode the response.
    ///
    /// Non-2xx responses fail with [`ApiError::HttpStatus`]. Successful bodies
    /// are parsed as JSON when possible and kept as text otherwise, then passed
    /// through the formatter if one is attached.
    pub async fn invoke(&self) -> Result<Decoded, ApiError> {
        let response = self.send().await?;
        let decoded = Decoded::from_text(response.text().await?);
        Ok(match &self.formatter {
            Some(format) => format(decoded),
            None => decoded,
        })
    }

    /// Perform the call and return the body exactly as the server sent it.
    ///
    /// Used for file downloads, where text decoding would corrupt binary
    /// content. The formatter is not applied.
    pub async fn invoke_bytes(&self) -> Result<Vec<u8>, ApiError> {
        let response = self.send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    #[instrument(
        name = "sortha_request",
        skip(self),
        fields(
            http.method = %self.method,
            http.url = %self.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn send(&self) -> Result<reqwest::Response, ApiError> {
        let http = match &self.http {
            Some(client) => client.clone(),
            None => reqwest::Client::builder().build()?,
        };

        let mut request = http.request(self.method.to_reqwest(), &self.url);
        for (name, value) in self.headers() {
            request = request.header(name, value);
        }
        request = match &self.body {
            None => request,
            Some(Body::Json(value)) => request.body(serde_json::to_vec(value)?),
            Some(Body::Multipart(form)) => request.multipart(form.to_form()?),
        };

        let response = request.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("request failed with status {status}");
            return Err(ApiError::HttpStatus { status, body });
        }
        Ok(response)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("jwt", &self.jwt.as_ref().map(|_| ".."))
            .field("body", &self.body)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && self.method == other.method
            && self.jwt == other.jwt
            && self.body == other.body
            && self.formatter.is_some() == other.formatter.is_some()
    }
}

/// Fluent assembler for [`Request`]. Purely structural: nothing is validated
/// until the request is invoked.
#[derive(Clone)]
pub struct RequestBuilder {
    url: String,
    method: HttpMethod,
    jwt: Option<String>,
    body: Option<Body>,
    formatter: Option<Formatter>,
    http: Option<reqwest::Client>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
            jwt: None,
            body: None,
            formatter: None,
            http: None,
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: Option<Body>) -> Self {
        self.body = body;
        self
    }

    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Decoded) -> Decoded + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Use a shared transport instead of creating one per invocation.
    pub fn transport(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Request {
        Request {
            url: self.url,
            method: self.method,
            jwt: self.jwt,
            body: self.body,
            formatter: self.formatter,
            http: self.http,
        }
    }
}
