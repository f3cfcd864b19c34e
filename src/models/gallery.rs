use chrono::{DateTime, NaiveDate, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::Document;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct GalleryImage {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub event_date: Option<NaiveDate>,
    #[serde(with = "timestamp")]
    pub uploaded_at: DateTime<Utc>,
}

impl Document for GalleryImage {
    const COLLECTION: &'static str = "gallery";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl GalleryImage {
    pub fn caption(&self) -> &str {
        if self.title.trim().is_empty() {
            "Activity Photo"
        } else {
            &self.title
        }
    }
}
