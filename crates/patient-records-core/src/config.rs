//! Store configuration.

use serde::{Deserialize, Serialize};

/// Slot key used when nothing else is configured.
pub const DEFAULT_SLOT_KEY: &str = "Patient";

/// Environment variable overriding the slot key.
pub const SLOT_KEY_ENV: &str = "PATIENT_RECORDS_SLOT_KEY";

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the slot holding the serialized record array
    pub slot_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Blank values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(key) = lookup(SLOT_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            config.slot_key = key.trim().to_string();
        }
        config
    }
}
