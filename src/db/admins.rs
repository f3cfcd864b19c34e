use chrono::{Duration, Utc};

use super::{
    delete_document, get_document, insert_document, query_documents, DocumentId, DocumentStore,
    Query, Record,
};
use crate::common::StoreError;
use crate::models::{AdminAccount, AdminSession};

pub const SESSION_LIFETIME_HOURS: i64 = 12;

/// Emails are compared lowercased; accounts are stored that way.
pub async fn get_admin_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<Record<AdminAccount>>, StoreError> {
    let email = email.trim().to_lowercase();
    let mut admins =
        query_documents::<AdminAccount>(store, &Query::new().filter("email", email)).await?;

    if admins.is_empty() {
        Ok(None)
    } else {
        Ok(Some(admins.swap_remove(0)))
    }
}

pub async fn get_admin(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<AdminAccount>>, StoreError> {
    get_document(store, id).await
}

pub async fn create_admin(
    store: &dyn DocumentStore,
    email: &str,
    password_hash: &str,
) -> Result<Record<AdminAccount>, StoreError> {
    let admin = AdminAccount {
        email: email.trim().to_lowercase(),
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
    };

    insert_document(store, &admin).await
}

pub async fn create_admin_session(
    store: &dyn DocumentStore,
    admin_id: &DocumentId,
) -> Result<Record<AdminSession>, StoreError> {
    let now = Utc::now();
    let session = AdminSession {
        admin_id: admin_id.clone(),
        created_at: now,
        expires_at: now + Duration::hours(SESSION_LIFETIME_HOURS),
    };

    insert_document(store, &session).await
}

pub async fn get_admin_session(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<AdminSession>>, StoreError> {
    get_document(store, id).await
}

pub async fn delete_admin_session(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    delete_document::<AdminSession>(store, id).await
}
