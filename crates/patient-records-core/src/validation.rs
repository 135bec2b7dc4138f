//! Draft validation.
//!
//! [`validate`] is a pure function over a [`PatientDraft`]: it never touches
//! the store and reports every failing field at once, so the form can show
//! each message next to its input.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{BloodType, Field, Gender, PatientDraft, PatientId, PatientRecord};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Field-keyed validation failures. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Failing fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Message shown for a failing field.
pub fn message_for(field: Field) -> &'static str {
    match field {
        Field::PatientName => "Patient name is required.",
        Field::Age => "Please enter a valid age.",
        Field::Email => "Please enter a valid email address.",
        Field::ContactNo => "Contact number must be 10 digits.",
        Field::Dob => "Date of birth is required.",
        Field::Gender => "Gender is required.",
        Field::BloodType => "Blood type is required.",
        Field::Insurance => "Insurance is required.",
        Field::Address => "Address is required.",
    }
}

/// Check every field of a draft.
pub fn validate(draft: &PatientDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in Field::ALL {
        if !field_is_valid(field, draft.get(field)) {
            errors.insert(field, message_for(field));
        }
    }

    errors
}

/// Validate a draft and, if it passes, build the record it describes.
pub fn into_record(draft: PatientDraft, id: PatientId) -> Result<PatientRecord, ValidationErrors> {
    let errors = validate(&draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    match (Gender::parse(&draft.gender), BloodType::parse(&draft.blood_type)) {
        (Some(gender), Some(blood_type)) => Ok(PatientRecord {
            id,
            patient_name: draft.patient_name,
            age: draft.age,
            email: draft.email,
            contact_no: draft.contact_no,
            dob: draft.dob,
            gender,
            blood_type,
            insurance: draft.insurance,
            address: draft.address,
        }),
        // Both already checked by validate().
        (gender, blood_type) => {
            let mut errors = ValidationErrors::new();
            if gender.is_none() {
                errors.insert(Field::Gender, message_for(Field::Gender));
            }
            if blood_type.is_none() {
                errors.insert(Field::BloodType, message_for(Field::BloodType));
            }
            Err(errors)
        }
    }
}

fn field_is_valid(field: Field, value: &str) -> bool {
    match field {
        Field::PatientName | Field::Address => !value.trim().is_empty(),
        Field::Age => is_valid_age(value),
        Field::Email => EMAIL_PATTERN.is_match(value),
        Field::ContactNo => is_valid_contact_no(value),
        Field::Dob | Field::Insurance => !value.is_empty(),
        Field::Gender => Gender::parse(value).is_some(),
        Field::BloodType => BloodType::parse(value).is_some(),
    }
}

/// Age must parse to a finite number greater than zero ("34", " 7 ", "0.5").
/// Hex literals ("0x10") and "Infinity" are not accepted as ages.
fn is_valid_age(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|age| age.is_finite() && age > 0.0)
        .unwrap_or(false)
}

fn is_valid_contact_no(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}
