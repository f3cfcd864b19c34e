use chrono::Utc;

use super::{
    delete_document, insert_document, query_documents, Direction, DocumentId, DocumentStore, Query,
    Record,
};
use crate::common::StoreError;
use crate::models::{Activity, ActivityCreate};

pub async fn list_activities(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<Activity>>, StoreError> {
    query_documents(store, &Query::new().order_by("date", Direction::Desc)).await
}

pub async fn create_activity(
    store: &dyn DocumentStore,
    data: &ActivityCreate,
) -> Result<Record<Activity>, StoreError> {
    let activity = Activity {
        title: data.title.clone(),
        description: data.description.clone(),
        date: data.date,
        location: data.location.clone(),
        photos: data.photos.clone(),
        videos: data.videos.clone(),
        created_at: Utc::now(),
    };

    insert_document(store, &activity).await
}

pub async fn delete_activity(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    delete_document::<Activity>(store, id).await
}
