#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use maagap::config::WebOptions;
use maagap::db::MemoryDocumentStore;
use maagap::models::*;
use maagap::storage::MemoryObjectStore;
use maagap::web::AppState;

pub const ADMIN_EMAIL: &str = "admin@maagap.test";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const BOUNDARY: &str = "maagap-test-boundary";

pub struct Fixture {
    pub store: Arc<MemoryDocumentStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub state: AppState,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryDocumentStore::new());
    let objects = Arc::new(MemoryObjectStore::new());
    let state = AppState::new(store.clone(), objects.clone(), WebOptions::default());

    Fixture {
        store,
        objects,
        state,
    }
}

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Invalid date in test helper")
}

/// A registration with every required field filled in.
pub fn get_seed_member(first_name: &str, last_name: &str, email: &str) -> Member {
    Member {
        member_type: MemberType::Regular,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        cp_tel_no: "+965 5555 0101".to_string(),
        city_address: "Salmiya, Kuwait".to_string(),
        occupation: "Nurse".to_string(),
        date_of_birth: Some(date("1990-06-15")),
        emergency_contact_name: "Maria Santos".to_string(),
        emergency_tel_cp_no: "+965 5555 0102".to_string(),
        ..Member::default()
    }
}

pub fn registration_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("member_type", "Associate"),
        ("last_name", "Dela Cruz"),
        ("first_name", "Juan"),
        ("email", "juan@example.com"),
        ("cp_tel_no", "+965 5555 0199"),
        ("city_address", "Farwaniya, Kuwait"),
        ("date_of_birth", "1985-03-20"),
        ("occupation", "Engineer"),
        ("emergency_contact_name", "Ana Dela Cruz"),
        ("emergency_tel_cp_no", "+965 5555 0198"),
    ]
}

pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encodes a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(texts: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in texts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for file in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.field, file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
