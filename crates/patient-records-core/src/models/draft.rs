//! Form drafts: raw, not-yet-validated field values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::patient::PatientRecord;

/// One editable field of the patient form.
///
/// The string form is the wire name used in persisted records and in the
/// error map handed back to the UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    #[serde(rename = "patientname")]
    PatientName,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "contactno")]
    ContactNo,
    #[serde(rename = "DOB")]
    Dob,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "bloodtype")]
    BloodType,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "address")]
    Address,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 9] = [
        Field::PatientName,
        Field::Age,
        Field::Email,
        Field::ContactNo,
        Field::Dob,
        Field::Gender,
        Field::BloodType,
        Field::Insurance,
        Field::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PatientName => "patientname",
            Field::Age => "age",
            Field::Email => "email",
            Field::ContactNo => "contactno",
            Field::Dob => "DOB",
            Field::Gender => "gender",
            Field::BloodType => "bloodtype",
            Field::Insurance => "Insurance",
            Field::Address => "address",
        }
    }

    /// Look up a field by its wire name, as emitted by the input's `name`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress form values.
///
/// A draft is never edited in place by the form: each input change produces
/// a new draft via [`PatientDraft::with_field`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientDraft {
    #[serde(rename = "patientname")]
    pub patient_name: String,
    pub age: String,
    pub email: String,
    #[serde(rename = "contactno")]
    pub contact_no: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    /// Selected radio value, empty if none
    pub gender: String,
    /// Selected option, empty if none
    #[serde(rename = "bloodtype")]
    pub blood_type: String,
    #[serde(rename = "Insurance")]
    pub insurance: String,
    pub address: String,
}

impl PatientDraft {
    /// Create an empty draft (the form's initial state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PatientName => &self.patient_name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::ContactNo => &self.contact_no,
            Field::Dob => &self.dob,
            Field::Gender => &self.gender,
            Field::BloodType => &self.blood_type,
            Field::Insurance => &self.insurance,
            Field::Address => &self.address,
        }
    }

    /// Return a copy of this draft with one field replaced.
    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            Field::PatientName => self.patient_name = value,
            Field::Age => self.age = value,
            Field::Email => self.email = value,
            Field::ContactNo => self.contact_no = value,
            Field::Dob => self.dob = value,
            Field::Gender => self.gender = value,
            Field::BloodType => self.blood_type = value,
            Field::Insurance => self.insurance = value,
            Field::Address => self.address = value,
        }
        self
    }
}

impl From<&PatientRecord> for PatientDraft {
    fn from(record: &PatientRecord) -> Self {
        Self {
            patient_name: record.patient_name.clone(),
            age: record.age.clone(),
            email: record.email.clone(),
            contact_no: record.contact_no.clone(),
            dob: record.dob.clone(),
            gender: record.gender.as_str().to_string(),
            blood_type: record.blood_type.as_str().to_string(),
            insurance: record.insurance.clone(),
            address: record.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, Gender};

    #[test]
    fn test_with_field_replaces_only_that_field() {
        let draft = PatientDraft::new()
            .with_field(Field::PatientName, "Jane Doe")
            .with_field(Field::Age, "34");

        let updated = draft.clone().with_field(Field::Age, "35");

        assert_eq!(draft.age, "34");
        assert_eq!(updated.age, "35");
        assert_eq!(updated.patient_name, "Jane Doe");
    }

    #[test]
    fn test_get_matches_with_field() {
        for field in Field::ALL {
            let draft = PatientDraft::new().with_field(field, "value");
            assert_eq!(draft.get(field), "value");
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_name("dob"), None);
        assert_eq!(Field::Dob.to_string(), "DOB");
    }

    #[test]
    fn test_prefill_from_record() {
        let record = PatientRecord {
            id: 3,
            patient_name: "Jane Doe".into(),
            age: "34".into(),
            email: "jane@x.com".into(),
            contact_no: "1234567890".into(),
            dob: "1990-01-01".into(),
            gender: Gender::Female,
            blood_type: BloodType::ONegative,
            insurance: "Acme".into(),
            address: "1 Main St".into(),
        };

        let draft = PatientDraft::from(&record);
        assert_eq!(draft.gender, "Female");
        assert_eq!(draft.blood_type, "O-");
        assert_eq!(draft.dob, "1990-01-01");
    }
}
