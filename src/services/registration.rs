use chrono::{DateTime, Utc};

use crate::common::{FormError, WriteError};
use crate::db::{self, DocumentStore, Record};
use crate::models::{Member, MemberStatus};
use crate::services::{count_email_uses, derive_age};
use crate::storage::{store_upload, ObjectPrefix, ObjectStore, UploadedFile};

/// A membership application as submitted, before anything is stored.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub member: Member,
    pub photo: Option<UploadedFile>,
}

/// Text fields that must be non-blank. Category and birth date are checked
/// separately since they are typed.
fn required_text(member: &Member) -> [(&'static str, &str); 8] {
    [
        ("last_name", member.last_name.as_str()),
        ("first_name", member.first_name.as_str()),
        ("email", member.email.as_str()),
        ("cp_tel_no", member.cp_tel_no.as_str()),
        ("city_address", member.city_address.as_str()),
        ("occupation", member.occupation.as_str()),
        ("emergency_contact_name", member.emergency_contact_name.as_str()),
        ("emergency_tel_cp_no", member.emergency_tel_cp_no.as_str()),
    ]
}

pub fn check_required(member: &Member) -> Result<(), FormError> {
    for (name, value) in required_text(member) {
        if value.trim().is_empty() {
            return Err(FormError::Missing(name));
        }
    }

    if member.date_of_birth.is_none() {
        return Err(FormError::Missing("date_of_birth"));
    }

    Ok(())
}

/// Uploads the photo (if any), fills in derived fields and writes the member.
/// A failed write after a successful upload leaves the object behind.
pub async fn register_member(
    store: &dyn DocumentStore,
    objects: &dyn ObjectStore,
    registration: Registration,
    now: DateTime<Utc>,
) -> Result<Record<Member>, WriteError> {
    let Registration { mut member, photo } = registration;

    check_required(&member)?;

    if let Some(photo) = &photo {
        member.photo_url = store_upload(objects, ObjectPrefix::MemberPhotos, photo).await?;
    }

    if member.age.is_none() {
        member.age = member
            .date_of_birth
            .map(|dob| derive_age(dob, now.date_naive()));
    }

    member.status = MemberStatus::Active;
    member.registration_date = now;
    member.created_at = now;

    flag_duplicate(store, &member).await;

    Ok(db::create_member(store, &member).await?)
}

async fn flag_duplicate(store: &dyn DocumentStore, member: &Member) {
    match count_email_uses(store, &member.email).await {
        Ok(existing) if existing > 0 => {
            tracing::warn!(
                email = %member.email,
                existing,
                "registration shares an email with an existing member"
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "duplicate registration check failed");
        }
    }
}
