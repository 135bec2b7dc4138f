//! Patient Records Core Library
//!
//! Local-only patient registry backing a single add/edit/list/delete form.
//!
//! # Architecture
//!
//! ```text
//! Form input → PatientDraft (replaced per keystroke)
//!                     │
//!                 validate()  ──── errors ───▶ shown inline, nothing stored
//!                     │
//!          RecordStore add / update / remove
//!                     │
//!        ┌────────────▼────────────┐
//!        │  stage copy of records  │
//!        │  write full JSON array  │
//!        │  swap in on success     │
//!        └────────────┬────────────┘
//!                     │
//!               Slot ("Patient")
//!          SQLite table │ in-memory
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, PatientDraft, Field, ...)
//! - [`validation`]: Per-field draft validation
//! - [`store`]: The record store and its id assignment
//! - [`slot`]: Persistence port and its in-memory implementation
//! - [`db`]: SQLite-backed slot table
//! - [`form`]: Add/edit form session
//! - [`config`]: Store configuration

pub mod config;
pub mod db;
pub mod form;
pub mod models;
pub mod slot;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::StoreConfig;
pub use db::Database;
pub use form::{FormMode, FormSession, SubmitOutcome};
pub use models::{BloodType, Field, Gender, PatientDraft, PatientId, PatientRecord};
pub use slot::{MemorySlot, Slot, SlotError};
pub use store::{RecordStore, StoreError};
pub use validation::{validate, ValidationErrors};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PatientRecordsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for PatientRecordsError {
    fn from(e: db::DbError) -> Self {
        PatientRecordsError::StorageError(e.to_string())
    }
}

impl From<StoreError> for PatientRecordsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid(errors) => PatientRecordsError::InvalidInput(errors.to_string()),
            StoreError::NotFound(id) => PatientRecordsError::NotFound(format!("patient {}", id)),
            StoreError::Serialize(e) => PatientRecordsError::SerializationError(e.to_string()),
            StoreError::Slot(e) => PatientRecordsError::StorageError(e.to_string()),
            StoreError::IdsExhausted => {
                PatientRecordsError::StorageError("no patient ids left to assign".into())
            }
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for PatientRecordsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PatientRecordsError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a record database at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let db = Database::open(&path)?;
    Ok(PatientRecordsCore::new(db))
}

/// Create an in-memory record database (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let db = Database::open_in_memory()?;
    Ok(PatientRecordsCore::new(db))
}

/// Install a stderr log formatter filtered by `RUST_LOG`. Safe to call more
/// than once.
#[uniffi::export]
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("patient_records_core=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// =========================================================================
// Main API Object
// =========================================================================

struct CoreState {
    store: RecordStore<Database>,
    form: FormSession,
}

/// Thread-safe store and form session for FFI.
#[derive(uniffi::Object)]
pub struct PatientRecordsCore {
    state: Mutex<CoreState>,
}

impl PatientRecordsCore {
    fn new(db: Database) -> Arc<Self> {
        let store = RecordStore::open_with_config(db, StoreConfig::from_env());
        Arc::new(Self {
            state: Mutex::new(CoreState {
                store,
                form: FormSession::new(),
            }),
        })
    }
}

#[uniffi::export]
impl PatientRecordsCore {
    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Validate a draft; an empty list means it can be stored.
    pub fn validate_draft(&self, draft: FfiPatientDraft) -> Vec<FfiFieldError> {
        field_errors(&validate(&draft.into()))
    }

    /// Add a patient.
    pub fn add_patient(&self, draft: FfiPatientDraft) -> Result<FfiPatientRecord, PatientRecordsError> {
        let mut state = self.state.lock()?;
        let record = state.store.add(draft.into())?;
        Ok(record.into())
    }

    /// Replace all fields of a patient.
    pub fn update_patient(
        &self,
        id: u64,
        draft: FfiPatientDraft,
    ) -> Result<FfiPatientRecord, PatientRecordsError> {
        let mut state = self.state.lock()?;
        let record = state.store.update(id, draft.into())?;
        Ok(record.into())
    }

    /// Delete a patient. Returns false if no such patient existed.
    pub fn remove_patient(&self, id: u64) -> Result<bool, PatientRecordsError> {
        let mut state = self.state.lock()?;
        Ok(state.store.remove(id)?)
    }

    /// All patients in insertion order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatientRecord>, PatientRecordsError> {
        let state = self.state.lock()?;
        Ok(state.store.list().iter().cloned().map(Into::into).collect())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: u64) -> Result<Option<FfiPatientRecord>, PatientRecordsError> {
        let state = self.state.lock()?;
        Ok(state.store.find_by_id(id).cloned().map(Into::into))
    }

    // =========================================================================
    // Form Operations
    // =========================================================================

    /// Apply an input change; `field` is the input's wire name (e.g. "DOB").
    pub fn form_set_field(&self, field: String, value: String) -> Result<(), PatientRecordsError> {
        let field = Field::from_name(&field)
            .ok_or_else(|| PatientRecordsError::InvalidInput(format!("unknown field {}", field)))?;
        let mut state = self.state.lock()?;
        state.form.set_field(field, value);
        Ok(())
    }

    /// Load a patient into the form for editing.
    pub fn form_begin_edit(&self, id: u64) -> Result<bool, PatientRecordsError> {
        let mut state = self.state.lock()?;
        let CoreState { store, form } = &mut *state;
        Ok(form.begin_edit(store, id))
    }

    pub fn form_cancel(&self) -> Result<(), PatientRecordsError> {
        let mut state = self.state.lock()?;
        state.form.cancel();
        Ok(())
    }

    /// Submit the form in its current mode.
    pub fn form_submit(&self) -> Result<FfiSubmitOutcome, PatientRecordsError> {
        let mut state = self.state.lock()?;
        let CoreState { store, form } = &mut *state;
        Ok(form.submit(store)?.into())
    }

    /// Delete a patient from the table view.
    pub fn form_delete(&self, id: u64) -> Result<bool, PatientRecordsError> {
        let mut state = self.state.lock()?;
        let CoreState { store, form } = &mut *state;
        Ok(form.delete(store, id)?)
    }

    /// Snapshot of what the form should render.
    pub fn form_state(&self) -> Result<FfiFormState, PatientRecordsError> {
        let state = self.state.lock()?;
        let form = &state.form;
        Ok(FfiFormState {
            heading: form.heading().to_string(),
            editing_id: match form.mode() {
                FormMode::Add => None,
                FormMode::Edit(id) => Some(id),
            },
            draft: form.draft().clone().into(),
            errors: field_errors(form.errors()),
        })
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientRecord {
    pub id: u64,
    pub patient_name: String,
    pub age: String,
    pub email: String,
    pub contact_no: String,
    pub dob: String,
    pub gender: String,
    pub blood_type: String,
    pub insurance: String,
    pub address: String,
}

impl From<PatientRecord> for FfiPatientRecord {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            patient_name: record.patient_name,
            age: record.age,
            email: record.email,
            contact_no: record.contact_no,
            dob: record.dob,
            gender: record.gender.to_string(),
            blood_type: record.blood_type.to_string(),
            insurance: record.insurance,
            address: record.address,
        }
    }
}

/// FFI-safe draft.
#[derive(Debug, Clone, Default, PartialEq, uniffi::Record)]
pub struct FfiPatientDraft {
    pub patient_name: String,
    pub age: String,
    pub email: String,
    pub contact_no: String,
    pub dob: String,
    pub gender: String,
    pub blood_type: String,
    pub insurance: String,
    pub address: String,
}

impl From<FfiPatientDraft> for PatientDraft {
    fn from(draft: FfiPatientDraft) -> Self {
        PatientDraft {
            patient_name: draft.patient_name,
            age: draft.age,
            email: draft.email,
            contact_no: draft.contact_no,
            dob: draft.dob,
            gender: draft.gender,
            blood_type: draft.blood_type,
            insurance: draft.insurance,
            address: draft.address,
        }
    }
}

impl From<PatientDraft> for FfiPatientDraft {
    fn from(draft: PatientDraft) -> Self {
        Self {
            patient_name: draft.patient_name,
            age: draft.age,
            email: draft.email,
            contact_no: draft.contact_no,
            dob: draft.dob,
            gender: draft.gender,
            blood_type: draft.blood_type,
            insurance: draft.insurance,
            address: draft.address,
        }
    }
}

/// One failing field, keyed by wire name.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

fn field_errors(errors: &ValidationErrors) -> Vec<FfiFieldError> {
    errors
        .iter()
        .map(|(field, message)| FfiFieldError {
            field: field.as_str().to_string(),
            message: message.to_string(),
        })
        .collect()
}

/// FFI-safe submit result. `status` is "added", "updated" or "rejected".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub status: String,
    pub record: Option<FfiPatientRecord>,
    pub errors: Vec<FfiFieldError>,
}

impl From<SubmitOutcome> for FfiSubmitOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Added(record) => Self {
                status: "added".into(),
                record: Some(record.into()),
                errors: Vec::new(),
            },
            SubmitOutcome::Updated(record) => Self {
                status: "updated".into(),
                record: Some(record.into()),
                errors: Vec::new(),
            },
            SubmitOutcome::Rejected(errors) => Self {
                status: "rejected".into(),
                record: None,
                errors: field_errors(&errors),
            },
        }
    }
}

/// FFI-safe form snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormState {
    pub heading: String,
    pub editing_id: Option<u64>,
    pub draft: FfiPatientDraft,
    pub errors: Vec<FfiFieldError>,
}
