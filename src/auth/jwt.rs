//! Symmetric-key JWT token algorithm
//!
//! Signs and verifies compact JWTs with an HMAC secret. Tokens carry an
//! email claim and a server-assigned expiry 12 hours after issue time.

use std::collections::HashMap;

use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};

use super::token::{TokenAlgorithm, ValidatedToken};
use crate::error::TokenError;

/// Token lifetime in hours
const TOKEN_TTL_HOURS: i64 = 12;

/// Claims embedded in an issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Email of the identity the token was issued for
    #[serde(default)]
    pub email: String,

    /// Expiry, UTC unix seconds
    pub exp: u64,
}

/// HMAC-signed JWT implementation of the token algorithm
pub struct HmacJwt {
    secret: String,
}

impl HmacJwt {
    /// Create a new algorithm instance bound to a signing secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl TokenAlgorithm for HmacJwt {
    fn generate(&self, claims: &HashMap<String, serde_json::Value>) -> Result<String, TokenError> {
        if claims.is_empty() {
            return Err(TokenError::EmptyClaims);
        }

        let email = claims
            .get("email")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let exp = (Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as u64;

        let claims = IdentityClaims { email, exp };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<ValidatedToken, TokenError> {
        if token.is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        match header.alg {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {}
            other => {
                return Err(TokenError::UnexpectedSigningMethod(format!("{:?}", other)));
            }
        }

        // Expiry is reported through is_valid rather than as a hard failure,
        // so the library's own exp check is disabled.
        let mut validation = Validation::new(header.alg);
        validation.validate_exp = false;

        let data = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        let is_valid = data.claims.exp > Utc::now().timestamp() as u64;
        Ok(ValidatedToken {
            claims: data.claims,
            is_valid,
        })
    }
}
