use chrono::{DateTime, NaiveDate, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::Document;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct Activity {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub location: String,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Activity {
    const COLLECTION: &'static str = "activities";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl Activity {
    pub fn date_display(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub location: String,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
}
