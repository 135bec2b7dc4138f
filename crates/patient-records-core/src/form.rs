//! Add/edit form session.
//!
//! Holds what the page shows between submits: the current draft, whether it
//! edits an existing record, and the errors from the last rejected submit.

use crate::models::{Field, PatientDraft, PatientId, PatientRecord};
use crate::slot::Slot;
use crate::store::{RecordStore, StoreError, StoreResult};
use crate::validation::ValidationErrors;

/// Whether a submit creates a record or replaces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    Edit(PatientId),
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added(PatientRecord),
    Updated(PatientRecord),
    /// Nothing was stored; the errors are also kept on the session
    Rejected(ValidationErrors),
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    mode: FormMode,
    draft: PatientDraft,
    errors: ValidationErrors,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &PatientDraft {
        &self.draft
    }

    /// Errors from the last rejected submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Patient",
            FormMode::Edit(_) => "Edit Patient",
        }
    }

    /// Apply one input change.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft = std::mem::take(&mut self.draft).with_field(field, value);
    }

    /// Load a stored record into the form for editing. Returns false and
    /// leaves the session alone if the id is unknown.
    pub fn begin_edit<S: Slot>(&mut self, store: &RecordStore<S>, id: PatientId) -> bool {
        match store.find_by_id(id) {
            Some(record) => {
                self.draft = PatientDraft::from(record);
                self.mode = FormMode::Edit(id);
                self.errors = ValidationErrors::new();
                true
            }
            None => false,
        }
    }

    /// Drop the current draft and return to add mode.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Validate and commit the draft.
    ///
    /// Validation failures are an `Ok(Rejected)` outcome; only store errors
    /// (missing record, slot write) come back as `Err`, with the session left
    /// as it was.
    pub fn submit<S: Slot>(&mut self, store: &mut RecordStore<S>) -> StoreResult<SubmitOutcome> {
        let draft = self.draft.clone();
        let result = match self.mode {
            FormMode::Add => store.add(draft).map(SubmitOutcome::Added),
            FormMode::Edit(id) => store.update(id, draft).map(SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                self.cancel();
                Ok(outcome)
            }
            Err(StoreError::Invalid(errors)) => {
                self.errors = errors.clone();
                Ok(SubmitOutcome::Rejected(errors))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a record from the table. Deleting the record being edited
    /// returns the form to add mode.
    pub fn delete<S: Slot>(&mut self, store: &mut RecordStore<S>, id: PatientId) -> StoreResult<bool> {
        let removed = store.remove(id)?;
        if self.mode == FormMode::Edit(id) {
            self.cancel();
        }
        Ok(removed)
    }
}
