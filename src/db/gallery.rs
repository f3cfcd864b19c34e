use super::{query_documents, Direction, DocumentStore, Query, Record};
use crate::common::StoreError;
use crate::models::GalleryImage;

pub async fn list_gallery_images(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<GalleryImage>>, StoreError> {
    query_documents(store, &Query::new().order_by("uploaded_at", Direction::Desc)).await
}
