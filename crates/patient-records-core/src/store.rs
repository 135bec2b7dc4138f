//! The record store: the ordered patient sequence and its slot.
//!
//! Every mutation is staged on a copy of the sequence, written to the slot
//! as a full JSON array, and only then made visible. A failed write leaves
//! the store exactly as it was.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::StoreConfig;
use crate::models::{PatientDraft, PatientId, PatientRecord};
use crate::slot::{Slot, SlotError};
use crate::validation::{self, ValidationErrors};

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid draft: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Patient not found: {0}")]
    NotFound(PatientId),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("No patient ids left to assign")]
    IdsExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Patient records mirrored to a single slot.
pub struct RecordStore<S: Slot> {
    slot: S,
    config: StoreConfig,
    records: Vec<PatientRecord>,
    /// `None` once the largest representable id has been handed out
    next_id: Option<PatientId>,
}

impl<S: Slot> RecordStore<S> {
    /// Open a store on the default slot key.
    pub fn open(slot: S) -> Self {
        Self::open_with_config(slot, StoreConfig::default())
    }

    /// Open a store, loading whatever the slot holds.
    ///
    /// Never fails: a missing, unreadable or unparsable slot yields an empty
    /// store. The slot is not rewritten until the first mutation.
    pub fn open_with_config(slot: S, config: StoreConfig) -> Self {
        let loaded = load_records(&slot, &config.slot_key);
        let (records, next_id) = assign_unique_ids(loaded);

        tracing::info!(
            "Opened patient store '{}' with {} record(s)",
            config.slot_key,
            records.len()
        );

        Self {
            slot,
            config,
            records,
            next_id,
        }
    }

    /// Check a draft without touching the store.
    pub fn validate(&self, draft: &PatientDraft) -> ValidationErrors {
        validation::validate(draft)
    }

    /// Append a new record built from a valid draft.
    pub fn add(&mut self, draft: PatientDraft) -> StoreResult<PatientRecord> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let record = validation::into_record(draft, id)?;

        let mut records = self.records.clone();
        records.push(record.clone());
        self.commit(records)?;
        self.next_id = id.checked_add(1);

        tracing::debug!("Added patient {}", record.id);
        Ok(record)
    }

    /// Replace every field of an existing record, keeping its id and position.
    pub fn update(&mut self, id: PatientId, draft: PatientDraft) -> StoreResult<PatientRecord> {
        let record = validation::into_record(draft, id)?;
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let mut records = self.records.clone();
        records[index] = record.clone();
        self.commit(records)?;

        tracing::debug!("Updated patient {}", id);
        Ok(record)
    }

    /// Delete a record. Unknown ids are a no-op; the slot is rewritten
    /// either way. Returns whether a record was removed.
    pub fn remove(&mut self, id: PatientId) -> StoreResult<bool> {
        let mut records = self.records.clone();
        records.retain(|r| r.id != id);
        let removed = records.len() != self.records.len();
        self.commit(records)?;

        if removed {
            tracing::debug!("Removed patient {}", id);
        }
        Ok(removed)
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn find_by_id(&self, id: PatientId) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Consume the store, returning its slot.
    pub fn into_slot(self) -> S {
        self.slot
    }

    fn position(&self, id: PatientId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn commit(&mut self, records: Vec<PatientRecord>) -> StoreResult<()> {
        let json = serde_json::to_string(&records)?;
        self.slot.write(&self.config.slot_key, &json)?;
        self.records = records;
        Ok(())
    }
}

fn load_records<S: Slot>(slot: &S, key: &str) -> Vec<PatientRecord> {
    let raw = match slot.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read slot '{}', starting empty: {}", key, e);
            return Vec::new();
        }
    };

    // A literal `null` counts as "no records".
    match serde_json::from_str::<Option<Vec<PatientRecord>>>(&raw) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Could not parse slot '{}', starting empty: {}", key, e);
            Vec::new()
        }
    }
}

/// Give every duplicate id after its first occurrence a fresh id, and return
/// the next id to hand out. Duplicates that cannot get a fresh id because the
/// id space is used up are dropped.
fn assign_unique_ids(records: Vec<PatientRecord>) -> (Vec<PatientRecord>, Option<PatientId>) {
    let mut next_id = match records.iter().map(|r| r.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    };
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for mut record in records {
        if !seen.insert(record.id) {
            let Some(fresh) = next_id else {
                tracing::warn!(
                    "Duplicate patient id {} in slot and no ids left, dropping it",
                    record.id
                );
                continue;
            };
            tracing::warn!(
                "Duplicate patient id {} in slot, reassigned to {}",
                record.id,
                fresh
            );
            record.id = fresh;
            seen.insert(fresh);
            next_id = fresh.checked_add(1);
        }
        unique.push(record);
    }

    (unique, next_id)
}
