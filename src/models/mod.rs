//! Data models for identity-gateway
//!
//! This module defines the database row types and the JSON wire envelopes
//! returned by the route handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identity row as stored and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Unique identity id
    pub id: String,

    /// First name
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// Last name
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Arbitrary profile document
    pub profile: Option<serde_json::Value>,

    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl IdentityRecord {
    /// Create a new identity record stamped with the current time
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a profile document
    pub fn with_profile(mut self, profile: serde_json::Value) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// An event row as stored and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Row id
    pub id: i64,

    /// Event name
    pub name: String,

    /// Event description
    pub description: String,

    /// Time the event was recorded
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

/// Response envelope for the event list route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    /// HTTP status echoed in the body
    pub code: u16,

    /// Event rows
    pub list: Vec<EventRecord>,
}

/// Response envelope for a single identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// HTTP status echoed in the body
    pub status: u16,

    /// The identity row
    pub identity: IdentityRecord,
}

/// Request body for token issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Identity id requesting a token
    #[serde(default)]
    pub id: String,

    /// Caller-supplied password material
    #[serde(default)]
    pub password: String,
}

/// Response body for token issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// HTTP status echoed in the body
    pub status: u16,

    /// Identity id the token was issued for
    pub id: String,

    /// The signed token
    pub token: String,
}
