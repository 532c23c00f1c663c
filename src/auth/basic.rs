//! Basic-auth credential extraction
//!
//! Parses the `Authorization: Basic <base64>` header into a credential pair.

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::{Authorizer, Credentials};

/// Authorizer variant reading standard basic-auth headers
#[derive(Debug, Clone, Default)]
pub struct BasicAuthorizer;

impl BasicAuthorizer {
    /// Create a new basic authorizer
    pub fn new() -> Self {
        Self
    }
}

impl Authorizer for BasicAuthorizer {
    fn authorize(&self, headers: &HeaderMap) -> Option<Credentials> {
        let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let encoded = header.strip_prefix("Basic ")?;

        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;

        let (username, password) = decoded.split_once(':')?;
        Some(Credentials::new(username, password))
    }
}
