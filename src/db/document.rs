use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use std::ops::Deref;

use super::{DocumentId, DocumentStore, Query, StoredDocument};
use crate::common::{timestamp, StoreError};

/// A typed document living in one collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Field names that may appear in filters and orderings.
    fn fields() -> &'static [&'static str];
}

/// A document that exists exactly once, under a fixed key.
pub trait Singleton: Document + Default {
    const KEY: &'static str;
}

/// A decoded document together with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub id: DocumentId,
    pub data: T,
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T: Document> Record<T> {
    fn decode(doc: StoredDocument) -> Result<Self, StoreError> {
        let data = serde_json::from_value(doc.data)?;
        Ok(Self { id: doc.id, data })
    }
}

fn check_fields<T: Document>(query: &Query) -> Result<(), StoreError> {
    let known = T::fields();
    match query.fields().find(|field| !known.contains(field)) {
        Some(field) => Err(StoreError::InvalidQuery(format!(
            "unknown field '{}' for collection '{}'",
            field,
            T::COLLECTION
        ))),
        None => Ok(()),
    }
}

pub async fn insert_document<T: Document + Clone>(
    store: &dyn DocumentStore,
    data: &T,
) -> Result<Record<T>, StoreError> {
    let id = store
        .insert(T::COLLECTION, serde_json::to_value(data)?)
        .await?;

    Ok(Record {
        id,
        data: data.clone(),
    })
}

pub async fn put_document<T: Document>(
    store: &dyn DocumentStore,
    id: &DocumentId,
    data: &T,
) -> Result<(), StoreError> {
    store
        .put(T::COLLECTION, id, serde_json::to_value(data)?)
        .await
}

pub async fn get_document<T: Document>(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<Option<Record<T>>, StoreError> {
    store
        .get(T::COLLECTION, id)
        .await?
        .map(Record::decode)
        .transpose()
}

/// Runs `query` and decodes the results. Documents that no longer match the
/// typed shape are skipped with a warning instead of failing the whole list.
pub async fn query_documents<T: Document>(
    store: &dyn DocumentStore,
    query: &Query,
) -> Result<Vec<Record<T>>, StoreError> {
    check_fields::<T>(query)?;

    let docs = store.query(T::COLLECTION, query).await?;
    let mut records = Vec::with_capacity(docs.len());

    for doc in docs {
        let id = doc.id.clone();
        match Record::decode(doc) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    %id,
                    error = %e,
                    "skipping malformed document"
                );
            }
        }
    }

    Ok(records)
}

pub async fn delete_document<T: Document>(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    store.delete(T::COLLECTION, id).await
}

/// Loads a singleton, falling back to its default when it was never saved.
pub async fn get_singleton<T: Singleton>(store: &dyn DocumentStore) -> Result<T, StoreError> {
    let key = DocumentId::new(T::KEY);
    Ok(get_document::<T>(store, &key)
        .await?
        .map(|record| record.data)
        .unwrap_or_default())
}

pub async fn save_singleton<T: Singleton>(
    store: &dyn DocumentStore,
    data: &T,
) -> Result<(), StoreError> {
    put_document(store, &DocumentId::new(T::KEY), data).await
}

pub const ERROR_LOG_COLLECTION: &str = "errorLogs";

pub async fn record_error(
    store: &dyn DocumentStore,
    location: &str,
    parameters: Value,
) -> Result<DocumentId, StoreError> {
    store
        .insert(
            ERROR_LOG_COLLECTION,
            json!({
                "location": location,
                "parameters": parameters,
                "created_at": timestamp::format(&Utc::now()),
            }),
        )
        .await
}
