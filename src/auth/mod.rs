//! Authentication for identity-gateway
//!
//! This module provides the authentication capabilities of the service:
//! - The `Authorizer` capability for extracting request credentials
//! - Basic-auth credential extraction
//! - A generic token service over interchangeable token algorithms
//! - The symmetric-key JWT algorithm
//! - The `AuthClient` facade composing one authorizer with one token service

pub mod basic;
pub mod client;
pub mod jwt;
pub mod token;

pub use basic::BasicAuthorizer;
pub use client::{AuthClient, TOKEN_HEADER};
pub use jwt::{HmacJwt, IdentityClaims};
pub use token::{TokenAlgorithm, TokenService, ValidatedToken};

use axum::http::HeaderMap;

/// Credentials extracted from a request
///
/// Ephemeral: never persisted, lives for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Principal identifier
    pub username: String,

    /// Secret
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Capability for extracting credentials from a request
///
/// One production variant exists today (basic auth); a token-based variant
/// would implement the same capability by consulting the token service
/// instead of the Authorization header.
#[cfg_attr(test, mockall::automock)]
pub trait Authorizer: Send + Sync {
    /// Extract credentials from the request headers
    ///
    /// Returns None when the expected header is absent or malformed.
    fn authorize(&self, headers: &HeaderMap) -> Option<Credentials>;
}
