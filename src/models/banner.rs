use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::Document;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct Banner {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Banner {
    const COLLECTION: &'static str = "banners";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub active: bool,
}
