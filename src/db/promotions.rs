use chrono::Utc;

use super::{
    delete_document, get_document, insert_document, put_document, query_documents, Direction,
    DocumentId, DocumentStore, Query, Record,
};
use crate::common::StoreError;
use crate::models::{Promotion, PromotionCreate};

pub async fn list_promotions(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<Promotion>>, StoreError> {
    query_documents(store, &Query::new().order_by("created_at", Direction::Desc)).await
}

pub async fn list_active_promotions(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<Promotion>>, StoreError> {
    query_documents(
        store,
        &Query::new()
            .filter("active", true)
            .order_by("created_at", Direction::Desc),
    )
    .await
}

pub async fn create_promotion(
    store: &dyn DocumentStore,
    data: &PromotionCreate,
) -> Result<Record<Promotion>, StoreError> {
    let promotion = Promotion {
        title: data.title.clone(),
        description: data.description.clone(),
        valid_until: data.valid_until,
        image_url: data.image_url.clone(),
        active: data.active,
        created_at: Utc::now(),
    };

    insert_document(store, &promotion).await
}

pub async fn toggle_promotion(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<Promotion>>, StoreError> {
    let Some(mut record) = get_document::<Promotion>(store, id).await? else {
        return Ok(None);
    };

    record.data.active = !record.data.active;
    put_document(store, &record.id, &record.data).await?;

    Ok(Some(record))
}

pub async fn delete_promotion(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    delete_document::<Promotion>(store, id).await
}
