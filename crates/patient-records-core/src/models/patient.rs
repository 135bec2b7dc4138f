//! Patient models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored patient record.
pub type PatientId = u64;

/// Patient gender as offered by the form's radio group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All selectable values, in form order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parse the exact form value (case-sensitive, as stored).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// All selectable values, in the order the select box lists them.
    pub const ALL: [BloodType; 8] = [
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == value)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed patient record.
///
/// Field names on the wire match the keys already present in persisted
/// slots (`patientname`, `DOB`, `Insurance`, ...), so renaming a Rust field
/// must never change its serde name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    /// Unique within a store, never reassigned
    pub id: PatientId,
    /// Full name
    #[serde(rename = "patientname")]
    pub patient_name: String,
    /// Age exactly as entered (e.g. "34")
    pub age: String,
    /// Contact email
    pub email: String,
    /// Ten-digit phone number
    #[serde(rename = "contactno")]
    pub contact_no: String,
    /// Date of birth as produced by the date input (e.g. "1990-01-01")
    #[serde(rename = "DOB")]
    pub dob: String,
    pub gender: Gender,
    #[serde(rename = "bloodtype")]
    pub blood_type: BloodType,
    /// Insurance provider
    #[serde(rename = "Insurance")]
    pub insurance: String,
    /// Postal address
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> PatientRecord {
        PatientRecord {
            id: 7,
            patient_name: "Jane Doe".into(),
            age: "34".into(),
            email: "jane@x.com".into(),
            contact_no: "1234567890".into(),
            dob: "1990-01-01".into(),
            gender: Gender::Female,
            blood_type: BloodType::OPositive,
            insurance: "Acme".into(),
            address: "1 Main St".into(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(jane()).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "id",
            "patientname",
            "age",
            "email",
            "contactno",
            "DOB",
            "gender",
            "bloodtype",
            "Insurance",
            "address",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["gender"], "Female");
        assert_eq!(obj["bloodtype"], "O+");
        assert_eq!(obj["id"], 7);
    }

    #[test]
    fn test_parse_existing_slot_entry() {
        let json = r#"{
            "id": 4821,
            "patientname": "Ravi Kumar",
            "age": "52",
            "email": "ravi@example.org",
            "contactno": "9876543210",
            "DOB": "1972-03-14",
            "gender": "Male",
            "bloodtype": "AB-",
            "Insurance": "Star Health",
            "address": "12 MG Road"
        }"#;

        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 4821);
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.blood_type, BloodType::AbNegative);
        assert_eq!(record.insurance, "Star Health");
    }

    #[test]
    fn test_enum_parse_is_exact() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("female"), None);
        assert_eq!(Gender::parse(""), None);

        for blood in BloodType::ALL {
            assert_eq!(BloodType::parse(blood.as_str()), Some(blood));
        }
        assert_eq!(BloodType::parse("C+"), None);
    }

    #[test]
    fn test_blood_type_select_order() {
        let labels: Vec<_> = BloodType::ALL.iter().map(BloodType::as_str).collect();
        assert_eq!(labels, vec!["AB+", "AB-", "B+", "B-", "A+", "A-", "O+", "O-"]);
    }
}
