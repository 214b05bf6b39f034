//! Declarative HTTP client for the Sortha files and workflows API.
//!
//! # Overview
//! Endpoints are described as data ([`Route`]) and executed uniformly: a
//! [`Client`] turns a route into a [`Request`], and `Request::invoke` performs
//! one HTTP call and returns the body as a [`Decoded`] value.
//!
//! ```no_run
//! # async fn run() -> Result<(), sortha_core::ApiError> {
//! use sortha_core::{routes::GetRootFolder, types::Folder, Anonymous, Client};
//!
//! let client = Client::new("http://localhost:8000", Anonymous)?;
//! let folders: Vec<Folder> = client
//!     .create_request(&GetRootFolder)
//!     .await?
//!     .invoke()
//!     .await?
//!     .deserialize()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Routes know nothing about transport; requests know nothing about routes.
//! - Bearer tokens come from an [`AuthProvider`] and are only requested for
//!   routes whose `needs_auth()` is true.
//! - Response decoding is best effort: JSON when it parses, raw text otherwise.
//! - Single attempt per request: no retries, no backoff, no cancellation.

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod multipart;
pub mod request;
pub mod route;
pub mod routes;
pub mod types;

pub use auth::{Anonymous, AuthProvider, StaticToken};
pub use client::Client;
pub use error::ApiError;
pub use http::{Body, Decoded, HttpMethod};
pub use multipart::{FormPart, MultipartForm};
pub use request::{Formatter, Request, RequestBuilder};
pub use route::Route;
