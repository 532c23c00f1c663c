//! Auth client facade
//!
//! Composes one authorizer variant with one token service and exposes the
//! combined surface used by route handlers and middleware. Constructed once
//! at startup and shared read-only across request tasks.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;

use super::token::{TokenService, ValidatedToken};
use super::{Authorizer, Credentials};
use crate::error::TokenError;

/// Name of the custom header carrying a token for validation
pub const TOKEN_HEADER: &str = "token";

/// Facade over one authorizer and one token service
#[derive(Clone)]
pub struct AuthClient {
    authorizer: Arc<dyn Authorizer>,
    tokens: TokenService,
}

impl AuthClient {
    /// Create a new auth client with its bindings
    pub fn new(authorizer: Arc<dyn Authorizer>, tokens: TokenService) -> Self {
        Self { authorizer, tokens }
    }

    /// Extract credentials from the request headers
    pub fn authorize(&self, headers: &HeaderMap) -> Option<Credentials> {
        self.authorizer.authorize(headers)
    }

    /// Generate a signed token for the given claims
    pub fn generate_token(
        &self,
        claims: &HashMap<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        self.tokens.generate(claims)
    }

    /// Validate the token carried in the `token` header
    ///
    /// An absent header reports Ok(false) without invoking the algorithm;
    /// a present but malformed or forged token propagates its error.
    pub fn validate_token_header(&self, headers: &HeaderMap) -> Result<bool, TokenError> {
        let token = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if token.is_empty() {
            return Ok(false);
        }

        let ValidatedToken { is_valid, .. } = self.tokens.validate_token(token)?;
        Ok(is_valid)
    }
}
