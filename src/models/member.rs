use chrono::{DateTime, NaiveDate, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use super::{MemberStatus, MemberType};
use crate::common::timestamp;
use crate::db::Document;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolRecord {
    pub school: String,
    pub course: String,
    pub date_completed: String,
}

impl SchoolRecord {
    pub fn is_empty(&self) -> bool {
        self.school.is_empty() && self.course.is_empty() && self.date_completed.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub elementary: SchoolRecord,
    pub secondary: SchoolRecord,
    pub vocational: SchoolRecord,
    pub college: SchoolRecord,
    pub graduate: SchoolRecord,
}

impl Education {
    pub const LEVELS: [&'static str; 5] =
        ["elementary", "secondary", "vocational", "college", "graduate"];

    /// `(form key, label, record)` for every level, lowest first.
    pub fn levels(&self) -> [(&'static str, &'static str, &SchoolRecord); 5] {
        [
            ("elementary", "Elementary", &self.elementary),
            ("secondary", "Secondary", &self.secondary),
            ("vocational", "Vocational", &self.vocational),
            ("college", "College", &self.college),
            ("graduate", "Graduate", &self.graduate),
        ]
    }

    pub fn level_mut(&mut self, level: &str) -> Option<&mut SchoolRecord> {
        match level {
            "elementary" => Some(&mut self.elementary),
            "secondary" => Some(&mut self.secondary),
            "vocational" => Some(&mut self.vocational),
            "college" => Some(&mut self.college),
            "graduate" => Some(&mut self.graduate),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterReference {
    pub name: String,
    pub address: String,
    pub contact: String,
}

/// Clearances handed in and fees paid at registration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    pub has_barangay_clearance: bool,
    pub has_pnp_clearance: bool,
    pub has_nbi_clearance: bool,
    pub has_2x2_photos: bool,
    pub paid_membership_fee: bool,
    pub paid_id_fee: bool,
    pub paid_insurance: bool,
    pub paid_damayan: bool,
}

impl Requirements {
    pub const FIELDS: [(&'static str, &'static str); 8] = [
        ("has_barangay_clearance", "Barangay clearance"),
        ("has_pnp_clearance", "PNP clearance"),
        ("has_nbi_clearance", "NBI clearance"),
        ("has_2x2_photos", "2x2 photos"),
        ("paid_membership_fee", "Membership fee paid"),
        ("paid_id_fee", "ID fee paid"),
        ("paid_insurance", "Insurance paid"),
        ("paid_damayan", "Damayan paid"),
    ];

    pub fn set(&mut self, name: &str, value: bool) {
        match name {
            "has_barangay_clearance" => self.has_barangay_clearance = value,
            "has_pnp_clearance" => self.has_pnp_clearance = value,
            "has_nbi_clearance" => self.has_nbi_clearance = value,
            "has_2x2_photos" => self.has_2x2_photos = value,
            "paid_membership_fee" => self.paid_membership_fee = value,
            "paid_id_fee" => self.paid_id_fee = value,
            "paid_insurance" => self.paid_insurance = value,
            "paid_damayan" => self.paid_damayan = value,
            _ => {}
        }
    }

    fn get(&self, name: &str) -> bool {
        match name {
            "has_barangay_clearance" => self.has_barangay_clearance,
            "has_pnp_clearance" => self.has_pnp_clearance,
            "has_nbi_clearance" => self.has_nbi_clearance,
            "has_2x2_photos" => self.has_2x2_photos,
            "paid_membership_fee" => self.paid_membership_fee,
            "paid_id_fee" => self.paid_id_fee,
            "paid_insurance" => self.paid_insurance,
            "paid_damayan" => self.paid_damayan,
            _ => false,
        }
    }

    /// `(field name, label, checked)` in display order.
    pub fn items(&self) -> Vec<(&'static str, &'static str, bool)> {
        Self::FIELDS
            .iter()
            .map(|(name, label)| (*name, *label, self.get(name)))
            .collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct Member {
    pub member_type: MemberType,
    pub status: MemberStatus,

    pub sponsor: String,
    pub chapter: String,
    pub province_city: String,
    pub region: String,

    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub pseudonym: String,
    pub email: String,
    pub cp_tel_no: String,
    pub provincial_address: String,
    pub city_address: String,
    pub office_business_address: String,
    pub occupation: String,

    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: String,
    pub age: Option<i32>,
    pub sex: String,
    pub civil_status: String,
    pub religion: String,
    pub dialect: String,
    pub height: String,
    pub weight: String,
    pub blood_type: String,
    pub phlt_no: String,
    pub sss_no: String,

    pub spouse_name: String,
    pub number_of_children: String,
    pub spouse_occupation: String,
    pub spouse_company: String,
    pub father_name: String,
    pub mother_name: String,

    pub education: Education,

    pub emergency_contact_name: String,
    pub emergency_relationship: String,
    pub emergency_address: String,
    pub emergency_tel_cp_no: String,

    pub references: Vec<CharacterReference>,
    pub requirements: Requirements,

    pub photo_url: String,

    #[serde(with = "timestamp")]
    pub registration_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Member {
    const COLLECTION: &'static str = "members";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl Member {
    pub const REFERENCE_SLOTS: usize = 3;

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age_display(&self) -> String {
        self.age.map(|a| a.to_string()).unwrap_or_default()
    }

    pub fn date_of_birth_display(&self) -> String {
        self.date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn registered_on(&self) -> String {
        self.registration_date.format("%Y-%m-%d").to_string()
    }

    /// Character references padded with blanks to the number of form slots.
    pub fn reference_slots(&self) -> Vec<(usize, CharacterReference)> {
        (0..Self::REFERENCE_SLOTS.max(self.references.len()))
            .map(|i| (i + 1, self.references.get(i).cloned().unwrap_or_default()))
            .collect()
    }

    pub fn occupation_or_default(&self) -> &str {
        if self.occupation.trim().is_empty() {
            "Member"
        } else {
            &self.occupation
        }
    }
}
