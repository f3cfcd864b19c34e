use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::{Document, Singleton};

const DEFAULT_BEGINNING: &str = "MAAGAP Kuwait District (MKD) was established by Filipino families in \
Kuwait who felt the calling to create a community rooted in faith, family values, and service. What \
started as small prayer meetings among friends has grown into a vibrant organization serving the \
Filipino community in Kuwait.";

const DEFAULT_GROWTH: &str = "Over the years, MAAGAP Kuwait has organized regular spiritual formation \
programs and prayer meetings, coordinated community outreach and charitable activities, provided \
support systems for Filipino families in Kuwait, fostered unity across different generations of \
members, and built partnerships with other Filipino organizations.";

const DEFAULT_PRESENT: &str = "Today, MAAGAP Kuwait continues to thrive as a community of active \
believers committed to living out our faith in practical ways. We remain dedicated to our founding \
principles while adapting to serve the evolving needs of our community.";

const DEFAULT_COMMITMENT: &str = "As we honor our past and celebrate our present, we remain committed \
to our mission of being multigeneration guardians of faith, actively serving God and our community \
with apostolic zeal.";

/// Long-form history text, stored once under `content/history`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
#[serde(default)]
pub struct HistoryContent {
    pub beginning: String,
    pub growth: String,
    pub present: String,
    pub commitment: String,
    #[serde(with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for HistoryContent {
    const COLLECTION: &'static str = "content";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl Singleton for HistoryContent {
    const KEY: &'static str = "history";
}

fn or_default<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() {
        fallback
    } else {
        text
    }
}

impl HistoryContent {
    /// Sections as shown publicly; empty sections fall back to the built-in text.
    pub fn sections(&self) -> [(&'static str, &str); 4] {
        [
            ("The Beginning", or_default(&self.beginning, DEFAULT_BEGINNING)),
            ("Growth and Development", or_default(&self.growth, DEFAULT_GROWTH)),
            ("Present Day", or_default(&self.present, DEFAULT_PRESENT)),
            ("Our Commitment", or_default(&self.commitment, DEFAULT_COMMITMENT)),
        ]
    }
}
