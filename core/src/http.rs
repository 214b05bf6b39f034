//! HTTP payload types shared by routes and requests.
//!
//! # Design
//! Everything here is plain data. A route describes its body as a [`Body`]
//! value and a request decodes what the server sent back into a [`Decoded`]
//! value, so building a request never touches the network and two requests
//! built from the same route compare equal.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::multipart::MultipartForm;

/// HTTP method for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload attached to a route.
///
/// JSON bodies are serialized and sent with `Content-Type: application/json`.
/// Multipart bodies are handed to the transport untouched, which picks its own
/// `multipart/form-data` boundary header.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Multipart(MultipartForm),
}

impl Body {
    /// Serialize any `Serialize` value into a JSON body.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, ApiError> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }
}

/// A response body after best-effort decoding.
///
/// Successful responses are read as text and parsed as JSON when possible.
/// Anything that is not valid JSON is kept verbatim as [`Decoded::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Json(Value),
    Text(String),
}

impl Decoded {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Decoded::Json(value),
            Err(e) => {
                tracing::debug!("response body is not JSON, keeping raw text: {e}");
                Decoded::Text(text)
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Decoded::Json(value) => Some(value),
            Decoded::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Decoded::Json(_) => None,
            Decoded::Text(text) => Some(text),
        }
    }

    /// Convert a JSON body into a typed value.
    ///
    /// Plain-text bodies are tried as a JSON string, so a `String` target
    /// accepts either variant.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Decoded::Json(value) => value,
            Decoded::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
            Decoded::Text(text) => f.write_str(text),
        }
    }
}
