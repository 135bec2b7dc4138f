//! Persistence port for the record store.
//!
//! A slot is a single named string value. The store keeps its whole record
//! sequence in one slot and rewrites it after every mutation.

use std::collections::HashMap;

use thiserror::Error;

use crate::db::{Database, DbError};

/// Slot backend errors.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Slot unavailable: {0}")]
    Unavailable(String),
}

pub type SlotResult<T> = Result<T, SlotError>;

/// A named key-value store holding serialized values.
pub trait Slot {
    /// Read the value under `key`; `None` if nothing was ever written.
    fn read(&self, key: &str) -> SlotResult<Option<String>>;

    /// Replace the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> SlotResult<()>;
}

/// In-memory slot, for tests and ephemeral stores.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value (e.g. a previously saved JSON array).
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.into(), value.into());
        slot
    }

    /// Raw value currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Slot for MemorySlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> SlotResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Slot for Database {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.get_slot(key)?)
    }

    fn write(&mut self, key: &str, value: &str) -> SlotResult<()> {
        Ok(self.put_slot(key, value)?)
    }
}
