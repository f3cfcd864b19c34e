use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::Document;

/// Admin-authored page served at `/{slug}`. Slugs are not unique; lookups
/// take the first match.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct CustomPage {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub order: i32,
    pub show_in_nav: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for CustomPage {
    const COLLECTION: &'static str = "customPages";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl CustomPage {
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPageCreate {
    pub title: String,
    /// Empty means "derive from the title".
    pub slug: String,
    pub content: String,
    pub order: i32,
    pub show_in_nav: bool,
}
