//! Configuration management for identity-gateway
//!
//! This module handles loading, parsing, and validating application
//! configuration from YAML files and environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // First, expand environment variables in the YAML string
        let expanded = expand_env_vars(yaml);
        serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse YAML: {}", e)))
    }

    /// Load configuration from environment variables with prefix IDENTITY_GATEWAY_
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Server config from env
        if let Ok(host) = std::env::var("IDENTITY_GATEWAY_SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("IDENTITY_GATEWAY_SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid port number".to_string()))?;
        }

        // Auth config from env
        if let Ok(secret) = std::env::var("IDENTITY_GATEWAY_AUTH_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(username) = std::env::var("IDENTITY_GATEWAY_AUTH_USERNAME") {
            config.auth.username = username;
        }
        if let Ok(password) = std::env::var("IDENTITY_GATEWAY_AUTH_PASSWORD") {
            config.auth.password = password;
        }

        // Database config from env
        if let Ok(path) = std::env::var("IDENTITY_GATEWAY_DATABASE_PATH") {
            config.database.path = path;
        }

        // Logging config from env
        if let Ok(level) = std::env::var("IDENTITY_GATEWAY_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9000
}

/// Authentication configuration
///
/// Holds the symmetric JWT signing secret and the single expected
/// basic-auth credential pair checked by the auth gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    /// Symmetric key used to sign and verify tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Expected basic-auth username
    #[serde(default = "default_username")]
    pub username: String,

    /// Expected basic-auth password
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    "tony".to_string()
}

fn default_password() -> String {
    "house".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "/data/db/identity-gateway.db".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read configuration: {0}")]
    FileRead(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Expand environment variables in a string
///
/// Supports `${VAR_NAME}` syntax
fn expand_env_vars(input: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .expect("Invalid regex pattern for environment variable expansion");

    re.replace_all(input, |caps: &regex_lite::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: Parse complete configuration from YAML
    #[test]
    fn test_parse_complete_yaml_config() {
        let yaml = r#"
server:
  host: "0.0.0.0"
  port: 8080

auth:
  jwt_secret: "shhh"
  username: "alice"
  password: "correct horse"

database:
  path: "/tmp/test.db"

logging:
  level: "debug"
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_secret, "shhh");
        assert_eq!(config.auth.username, "alice");
        assert_eq!(config.auth.password, "correct horse");
        assert_eq!(config.database.path, "/tmp/test.db");
        assert_eq!(config.logging.level, "debug");
    }

    // Test 2: Empty YAML produces all defaults
    #[test]
    fn test_parse_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.username, "tony");
        assert_eq!(config.auth.password, "house");
        assert!(config.auth.jwt_secret.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    // Test 3: Partial sections fall back to per-field defaults
    #[test]
    fn test_partial_section_defaults() {
        let yaml = r#"
server:
  port: 3000

auth:
  jwt_secret: "topsecret"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_secret, "topsecret");
        assert_eq!(config.auth.username, "tony");
    }

    // Test 4: Invalid YAML returns a Parse error
    #[test]
    fn test_invalid_yaml_returns_error() {
        let result = Config::from_yaml("server: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    // Test 5: Missing file returns a FileRead error
    #[test]
    fn test_missing_file_returns_error() {
        let result = Config::from_file("/nonexistent/path/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    // Test 6: Environment variable expansion in YAML
    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("IDENTITY_GATEWAY_TEST_SECRET", "from-env");
        let yaml = r#"
auth:
  jwt_secret: "${IDENTITY_GATEWAY_TEST_SECRET}"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-env");
        std::env::remove_var("IDENTITY_GATEWAY_TEST_SECRET");
    }

    // Test 7: Unset variables are left as-is
    #[test]
    fn test_env_var_expansion_unset_left_verbatim() {
        let expanded = expand_env_vars("value: ${DEFINITELY_NOT_SET_ANYWHERE_123}");
        assert_eq!(expanded, "value: ${DEFINITELY_NOT_SET_ANYWHERE_123}");
    }
}
