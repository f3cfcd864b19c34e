use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::{Document, Singleton};

/// Site-wide text and switches, stored once under `settings/website`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct WebsiteSettings {
    pub site_title: String,
    pub site_subtitle: String,
    pub motto: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub location: String,
    pub show_banner: bool,
    pub maintenance_mode: bool,
    #[serde(with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            site_title: "MAAGAP Kuwait".to_string(),
            site_subtitle: "Multigeneration of Active Apostolic Guardians Association".to_string(),
            motto: "THE TRUTH STILL STAND".to_string(),
            contact_email: "info@maagapkuwait.org".to_string(),
            contact_phone: String::new(),
            location: "Kuwait".to_string(),
            show_banner: true,
            maintenance_mode: false,
            updated_at: None,
        }
    }
}

impl Document for WebsiteSettings {
    const COLLECTION: &'static str = "settings";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl Singleton for WebsiteSettings {
    const KEY: &'static str = "website";
}
