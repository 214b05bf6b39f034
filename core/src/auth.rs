//! Bearer token providers.
//!
//! The client only asks a provider for a token when a route needs auth. Token
//! retrieval may involve I/O (refresh against an identity service, reading a
//! credentials file), so the trait is async.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;

/// Source of bearer tokens for authenticated routes.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn token(&self) -> Result<String, ApiError>;
}

#[async_trait]
impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    async fn token(&self) -> Result<String, ApiError> {
        (**self).token().await
    }
}

/// A fixed bearer token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

#[async_trait]
impl AuthProvider for StaticToken {
    async fn token(&self) -> Result<String, ApiError> {
        Ok(self.0.clone())
    }
}

/// Provider for deployments without credentials. Routes that need auth fail
/// when paired with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl AuthProvider for Anonymous {
    async fn token(&self) -> Result<String, ApiError> {
        Err(ApiError::Auth("no bearer token configured".to_string()))
    }
}
