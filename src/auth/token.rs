//! Generic token service
//!
//! A thin delegator over any token algorithm, letting callers depend on a
//! stable narrow contract while the concrete signing scheme is injected.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::jwt::IdentityClaims;
use crate::error::TokenError;

/// Outcome of validating a token
///
/// A token that parses and carries a genuine signature still reports
/// `is_valid = false` once its expiry has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken {
    /// The decoded claims
    pub claims: IdentityClaims,

    /// Whether the token is within its expiry window
    pub is_valid: bool,
}

/// Capability for producing and validating signed, time-bound tokens
#[cfg_attr(test, mockall::automock)]
pub trait TokenAlgorithm: Send + Sync {
    /// Generate a signed token embedding the given claims plus an expiry
    fn generate(&self, claims: &HashMap<String, serde_json::Value>) -> Result<String, TokenError>;

    /// Parse and verify a token against the configured secret
    fn validate(&self, token: &str) -> Result<ValidatedToken, TokenError>;
}

/// Generic token service wrapping one algorithm instance
#[derive(Clone)]
pub struct TokenService {
    algorithm: Arc<dyn TokenAlgorithm>,
}

impl TokenService {
    /// Create a new token service over the given algorithm
    pub fn new(algorithm: Arc<dyn TokenAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Validate a token, delegating to the bound algorithm
    pub fn validate_token(&self, token: &str) -> Result<ValidatedToken, TokenError> {
        self.algorithm.validate(token)
    }

    /// Generate a token, delegating to the bound algorithm
    pub fn generate(
        &self,
        claims: &HashMap<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        self.algorithm.generate(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: generate passes through to the algorithm
    #[test]
    fn test_generate_delegates() {
        let mut mock = MockTokenAlgorithm::new();
        mock.expect_generate()
            .returning(|_| Ok("signed-token".to_string()));

        let service = TokenService::new(Arc::new(mock));
        let mut claims = HashMap::new();
        claims.insert("email".to_string(), serde_json::json!("a@b.com"));

        assert_eq!(service.generate(&claims).unwrap(), "signed-token");
    }

    // Test 2: validate_token passes through to the algorithm
    #[test]
    fn test_validate_delegates() {
        let mut mock = MockTokenAlgorithm::new();
        mock.expect_validate().returning(|_| {
            Ok(ValidatedToken {
                claims: IdentityClaims {
                    email: "a@b.com".to_string(),
                    exp: 0,
                },
                is_valid: false,
            })
        });

        let service = TokenService::new(Arc::new(mock));
        let outcome = service.validate_token("some-token").unwrap();
        assert_eq!(outcome.claims.email, "a@b.com");
        assert!(!outcome.is_valid);
    }

    // Test 3: algorithm errors surface unchanged
    #[test]
    fn test_errors_surface() {
        let mut mock = MockTokenAlgorithm::new();
        mock.expect_validate()
            .returning(|_| Err(TokenError::EmptyToken));

        let service = TokenService::new(Arc::new(mock));
        assert_eq!(
            service.validate_token("").unwrap_err(),
            TokenError::EmptyToken
        );
    }
}
