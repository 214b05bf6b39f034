//! The contract every API endpoint implements.
//!
//! # Design
//! A route says *what* an endpoint is (method, path, auth requirement, body)
//! and nothing about *how* it is called. `Client` turns a route into a
//! `Request`. The four methods have no defaults: a route type that forgets
//! one does not compile.

use crate::error::ApiError;
use crate::http::{Body, HttpMethod};

pub trait Route {
    fn method(&self) -> HttpMethod;

    /// Path relative to the client's base URL, with identifiers already
    /// interpolated. Always starts with `/`.
    fn path(&self) -> String;

    /// When true, the client attaches `Authorization: Bearer <token>`.
    fn needs_auth(&self) -> bool;

    fn body(&self) -> Result<Option<Body>, ApiError>;
}
