//! Application error types for identity-gateway
//!
//! This module defines common error types used throughout the application.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Token generation and validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    /// Generate was called with an empty claims map
    #[error("cannot generate a token without claims")]
    EmptyClaims,

    /// Validate was called with an empty token string
    #[error("cannot validate an empty token")]
    EmptyToken,

    /// Token is structurally malformed
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Token signature does not match the configured secret
    #[error("token signature mismatch")]
    InvalidSignature,

    /// Token header declares a non-HMAC signing algorithm
    #[error("unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    /// Signing the token failed
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Authorization errors produced by the auth gate
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// Basic-auth header absent or malformed
    #[error("missing or malformed credentials")]
    MissingCredentials,

    /// Credentials present but do not match the configured pair
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DbError {
    /// SQLite error
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection task error
    #[error("database connection error: {0}")]
    Connection(String),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// An insert touched an unexpected number of rows
    #[error("insert affected {0} rows")]
    UnexpectedRowCount(usize),
}

impl From<tokio_rusqlite::Error> for DbError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => DbError::Sqlite(e),
            other => DbError::Connection(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: TokenError message formatting
    #[test]
    fn test_token_error_messages() {
        assert_eq!(
            TokenError::EmptyClaims.to_string(),
            "cannot generate a token without claims"
        );
        assert_eq!(
            TokenError::EmptyToken.to_string(),
            "cannot validate an empty token"
        );
        assert_eq!(
            TokenError::Malformed("bad segment count".to_string()).to_string(),
            "malformed token: bad segment count"
        );
        assert_eq!(
            TokenError::InvalidSignature.to_string(),
            "token signature mismatch"
        );
        assert_eq!(
            TokenError::UnexpectedSigningMethod("RS256".to_string()).to_string(),
            "unexpected signing method: RS256"
        );
    }

    // Test 2: AuthError message formatting
    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::MissingCredentials.to_string(),
            "missing or malformed credentials"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
    }

    // Test 3: DbError message formatting
    #[test]
    fn test_db_error_messages() {
        assert_eq!(DbError::NotFound.to_string(), "record not found");
        assert_eq!(
            DbError::UnexpectedRowCount(3).to_string(),
            "insert affected 3 rows"
        );
        assert_eq!(
            DbError::Connection("channel closed".to_string()).to_string(),
            "database connection error: channel closed"
        );
    }

    // Test 4: DbError from rusqlite::Error
    #[test]
    fn test_db_error_from_sqlite() {
        let sqlite_err = rusqlite::Error::InvalidParameterName("test".to_string());
        let db_err: DbError = sqlite_err.into();

        match db_err {
            DbError::Sqlite(_) => (),
            _ => panic!("Expected DbError::Sqlite"),
        }
    }

    // Test 5: TokenError Clone and PartialEq
    #[test]
    fn test_token_error_clone_and_eq() {
        let err1 = TokenError::UnexpectedSigningMethod("none".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, TokenError::InvalidSignature);
    }
}
