use chrono::Utc;

use super::{
    delete_document, insert_document, query_documents, Direction, DocumentId, DocumentStore, Query,
    Record,
};
use crate::common::StoreError;
use crate::models::{CustomPage, CustomPageCreate};
use crate::services::resolve_slug;

pub async fn list_custom_pages(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<CustomPage>>, StoreError> {
    query_documents(store, &Query::new().order_by("order", Direction::Asc)).await
}

pub async fn list_nav_pages(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<CustomPage>>, StoreError> {
    query_documents(
        store,
        &Query::new()
            .filter("show_in_nav", true)
            .order_by("order", Direction::Asc),
    )
    .await
}

/// First page stored under `slug`, if any.
pub async fn get_page_by_slug(
    store: &dyn DocumentStore,
    slug: &str,
) -> Result<Option<Record<CustomPage>>, StoreError> {
    let mut pages = query_documents::<CustomPage>(store, &Query::new().filter("slug", slug)).await?;

    if pages.is_empty() {
        Ok(None)
    } else {
        Ok(Some(pages.swap_remove(0)))
    }
}

pub async fn create_custom_page(
    store: &dyn DocumentStore,
    data: &CustomPageCreate,
) -> Result<Record<CustomPage>, StoreError> {
    let page = CustomPage {
        title: data.title.clone(),
        slug: resolve_slug(&data.slug, &data.title),
        content: data.content.clone(),
        order: data.order,
        show_in_nav: data.show_in_nav,
        created_at: Utc::now(),
    };

    insert_document(store, &page).await
}

pub async fn delete_custom_page(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    delete_document::<CustomPage>(store, id).await
}
