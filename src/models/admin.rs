use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use crate::common::timestamp;
use crate::db::{Document, DocumentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for AdminAccount {
    const COLLECTION: &'static str = "admins";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
pub struct AdminSession {
    pub admin_id: DocumentId,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub expires_at: DateTime<Utc>,
}

impl Document for AdminSession {
    const COLLECTION: &'static str = "adminSessions";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
