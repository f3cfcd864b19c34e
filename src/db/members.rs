use super::{
    delete_document, get_document, insert_document, put_document, query_documents, Direction,
    DocumentId, DocumentStore, Query, Record,
};
use crate::common::StoreError;
use crate::models::{Member, MemberStatus};

pub async fn list_members(store: &dyn DocumentStore) -> Result<Vec<Record<Member>>, StoreError> {
    query_documents(store, &Query::new().order_by("created_at", Direction::Desc)).await
}

/// Public directory: active members by last name.
pub async fn list_active_members(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<Member>>, StoreError> {
    query_documents(
        store,
        &Query::new()
            .filter("status", MemberStatus::Active.as_str())
            .order_by("last_name", Direction::Asc),
    )
    .await
}

pub async fn get_member(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<Member>>, StoreError> {
    get_document(store, id).await
}

pub async fn create_member(
    store: &dyn DocumentStore,
    member: &Member,
) -> Result<Record<Member>, StoreError> {
    insert_document(store, member).await
}

pub async fn toggle_member_status(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<Member>>, StoreError> {
    let Some(mut record) = get_member(store, id).await? else {
        return Ok(None);
    };

    record.data.status = record.data.status.toggled();
    put_document(store, &record.id, &record.data).await?;

    Ok(Some(record))
}

pub async fn delete_member(store: &dyn DocumentStore, id: &DocumentId) -> Result<bool, StoreError> {
    delete_document::<Member>(store, id).await
}
