use chrono::{DateTime, NaiveDate, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::Document;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct Promotion {
    pub title: String,
    pub description: String,
    pub valid_until: Option<NaiveDate>,
    pub image_url: String,
    pub active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Promotion {
    const COLLECTION: &'static str = "promotions";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl Promotion {
    /// Active and not past its end date. No end date means open-ended.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.active && self.valid_until.map_or(true, |until| until >= today)
    }

    pub fn valid_until_display(&self) -> String {
        self.valid_until
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCreate {
    pub title: String,
    pub description: String,
    pub valid_until: Option<NaiveDate>,
    pub image_url: String,
    pub active: bool,
}
