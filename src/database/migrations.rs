//! Database schema for identity-gateway

/// Schema creation statements, idempotent via IF NOT EXISTS
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS identity (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    profile TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    date_added TEXT NOT NULL
);
"#;
