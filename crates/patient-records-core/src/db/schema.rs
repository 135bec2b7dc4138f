//! SQLite schema definition.

/// Schema for the key-value slot table.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Slots
-- ============================================================================

-- One row per named slot; the value is an opaque string (JSON for the
-- record store).
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
