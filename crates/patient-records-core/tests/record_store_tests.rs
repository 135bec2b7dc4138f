//! Record store integration tests.

use std::collections::HashSet;

use patient_records_core::db::Database;
use patient_records_core::models::{BloodType, Field, Gender, PatientDraft};
use patient_records_core::slot::MemorySlot;
use patient_records_core::store::{RecordStore, StoreError};

fn jane_doe() -> PatientDraft {
    PatientDraft {
        patient_name: "Jane Doe".to_string(),
        age: "34".to_string(),
        email: "jane@x.com".to_string(),
        contact_no: "1234567890".to_string(),
        dob: "1990-01-01".to_string(),
        gender: "Female".to_string(),
        blood_type: "O+".to_string(),
        insurance: "Acme".to_string(),
        address: "1 Main St".to_string(),
    }
}

fn assert_matches_draft(record: &patient_records_core::PatientRecord, draft: &PatientDraft) {
    assert_eq!(record.patient_name, draft.patient_name);
    assert_eq!(record.age, draft.age);
    assert_eq!(record.email, draft.email);
    assert_eq!(record.contact_no, draft.contact_no);
    assert_eq!(record.dob, draft.dob);
    assert_eq!(record.gender.as_str(), draft.gender);
    assert_eq!(record.blood_type.as_str(), draft.blood_type);
    assert_eq!(record.insurance, draft.insurance);
    assert_eq!(record.address, draft.address);
}

#[test]
fn test_jane_doe_scenario() {
    let mut store = RecordStore::open(MemorySlot::new());

    assert!(store.validate(&jane_doe()).is_empty());
    let record = store.add(jane_doe()).unwrap();

    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].age, "34");
    assert_eq!(record.gender, Gender::Female);
    assert_eq!(record.blood_type, BloodType::OPositive);
    assert_matches_draft(&store.list()[0], &jane_doe());
}

#[test]
fn test_negative_age_scenario() {
    let mut store = RecordStore::open(MemorySlot::new());
    let draft = jane_doe().with_field(Field::Age, "-5");

    let errors = store.validate(&draft);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::Age), Some("Please enter a valid age."));

    assert!(matches!(store.add(draft), Err(StoreError::Invalid(_))));
    assert!(store.is_empty());
}

#[test]
fn test_added_ids_are_unique() {
    let mut store = RecordStore::open(MemorySlot::new());
    let mut ids = HashSet::new();

    for i in 0..50 {
        let record = store
            .add(jane_doe().with_field(Field::PatientName, format!("Patient {}", i)))
            .unwrap();
        assert!(ids.insert(record.id), "id {} handed out twice", record.id);
        if i % 3 == 0 {
            store.remove(record.id).unwrap();
        }
    }
}

#[test]
fn test_update_then_find() {
    let mut store = RecordStore::open(MemorySlot::new());
    let original = store.add(jane_doe()).unwrap();

    let edited = jane_doe()
        .with_field(Field::Email, "jane.doe@y.org")
        .with_field(Field::BloodType, "AB-")
        .with_field(Field::Gender, "Male");
    store.update(original.id, edited.clone()).unwrap();

    let found = store.find_by_id(original.id).unwrap();
    assert_eq!(found.id, original.id);
    assert_matches_draft(found, &edited);
}

#[test]
fn test_remove_then_find() {
    let mut store = RecordStore::open(MemorySlot::new());
    let a = store.add(jane_doe()).unwrap();
    store.add(jane_doe()).unwrap();

    store.remove(a.id).unwrap();
    assert!(store.find_by_id(a.id).is_none());

    let before = store.list().to_vec();
    assert!(!store.remove(9999).unwrap());
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn test_round_trip_memory_slot() {
    let mut store = RecordStore::open(MemorySlot::new());
    store.add(jane_doe()).unwrap();
    let b = store.add(jane_doe().with_field(Field::PatientName, "John Roe")).unwrap();
    store.add(jane_doe().with_field(Field::Insurance, "Initech")).unwrap();
    store.update(b.id, jane_doe().with_field(Field::Age, "61")).unwrap();

    let before = store.list().to_vec();
    let reloaded = RecordStore::open(store.into_slot());

    assert_eq!(reloaded.list(), before.as_slice());
}

#[test]
fn test_round_trip_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.db");

    let before = {
        let mut store = RecordStore::open(Database::open(&path).unwrap());
        store.add(jane_doe()).unwrap();
        store.add(jane_doe().with_field(Field::Dob, "1985-07-23")).unwrap();
        store.list().to_vec()
    };

    let reloaded = RecordStore::open(Database::open(&path).unwrap());
    assert_eq!(reloaded.list(), before.as_slice());
}

#[test]
fn test_loads_slot_written_by_earlier_page() {
    // Ids drawn at random by an older writer, unordered.
    let raw = r#"[
        {"id":5120,"patientname":"A","age":"30","email":"a@b.co","contactno":"1111111111",
         "DOB":"1994-02-02","gender":"Male","bloodtype":"B+","Insurance":"X","address":"Y"},
        {"id":17,"patientname":"B","age":"41","email":"b@b.co","contactno":"2222222222",
         "DOB":"1983-05-05","gender":"Female","bloodtype":"A-","Insurance":"X","address":"Z"}
    ]"#;
    let mut store = RecordStore::open(MemorySlot::with_value("Patient", raw));

    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0].id, 5120);
    assert_eq!(store.list()[1].blood_type, BloodType::ANegative);

    let added = store.add(jane_doe()).unwrap();
    assert_eq!(added.id, 5121);
}
