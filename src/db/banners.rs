use chrono::Utc;

use super::{
    delete_document, get_document, insert_document, put_document, query_documents, Direction,
    DocumentId, DocumentStore, Query, Record,
};
use crate::common::StoreError;
use crate::models::{Banner, BannerCreate};

pub async fn list_banners(store: &dyn DocumentStore) -> Result<Vec<Record<Banner>>, StoreError> {
    query_documents(store, &Query::new().order_by("created_at", Direction::Desc)).await
}

pub async fn list_active_banners(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<Banner>>, StoreError> {
    query_documents(
        store,
        &Query::new()
            .filter("active", true)
            .order_by("created_at", Direction::Desc),
    )
    .await
}

pub async fn create_banner(
    store: &dyn DocumentStore,
    data: &BannerCreate,
) -> Result<Record<Banner>, StoreError> {
    let banner = Banner {
        title: data.title.clone(),
        description: data.description.clone(),
        image_url: data.image_url.clone(),
        link: data.link.clone(),
        active: data.active,
        created_at: Utc::now(),
    };

    insert_document(store, &banner).await
}

/// Flips `active` with a full-document overwrite. `None` when the banner is gone.
pub async fn toggle_banner(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<Banner>>, StoreError> {
    let Some(mut record) = get_document::<Banner>(store, id).await? else {
        return Ok(None);
    };

    record.data.active = !record.data.active;
    put_document(store, &record.id, &record.data).await?;

    Ok(Some(record))
}

pub async fn delete_banner(store: &dyn DocumentStore, id: &DocumentId) -> Result<bool, StoreError> {
    delete_document::<Banner>(store, id).await
}
