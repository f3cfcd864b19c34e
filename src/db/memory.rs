use async_trait::async_trait;
use serde_json::Value;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Direction, DocumentId, DocumentStore, Query, StoredDocument};
use crate::common::StoreError;

/// Process-local document store. Used when no database is configured and in
/// tests. Each collection keeps documents in insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read fail, to exercise error paths.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, AtomicOrdering::SeqCst);
    }

    /// Makes every subsequent write fail, to exercise error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, AtomicOrdering::SeqCst);
    }

    pub fn count(&self, collection: &str) -> usize {
        self.read().get(collection).map_or(0, Vec::len)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<StoredDocument>>> {
        self.collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<StoredDocument>>> {
        self.collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }
}

fn type_rank(value: &Value) -> u8 {
    // Same cross-type order PostgreSQL uses for jsonb.
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a.len().cmp(&b.len()),
        (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn field<'a>(doc: &'a StoredDocument, name: &str) -> &'a Value {
    doc.data.get(name).unwrap_or(&Value::Null)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<DocumentId, StoreError> {
        self.check_write()?;

        let id = DocumentId::generate();
        self.write()
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data,
            });

        Ok(id)
    }

    async fn put(&self, collection: &str, id: &DocumentId, data: Value) -> Result<(), StoreError> {
        self.check_write()?;

        let mut collections = self.write();
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|doc| &doc.id == id) {
            Some(existing) => existing.data = data,
            None => docs.push(StoredDocument {
                id: id.clone(),
                data,
            }),
        }

        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.check_read()?;

        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| &doc.id == id))
            .cloned())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_read()?;

        let mut matches: Vec<StoredDocument> = self
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| {
                        query
                            .filters
                            .iter()
                            .all(|(name, value)| field(doc, name) == value)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // `sort_by` is stable, so ties keep insertion order.
        if let Some(order) = &query.order {
            matches.sort_by(|a, b| {
                let ord = compare_values(field(a, &order.field), field(b, &order.field));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        Ok(matches)
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<bool, StoreError> {
        self.check_write()?;

        let mut collections = self.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|doc| &doc.id != id);
        Ok(docs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_sorts_before_strings_and_numbers() {
        assert_eq!(compare_values(&Value::Null, &json!("a")), Ordering::Less);
        assert_eq!(compare_values(&json!("z"), &json!(1)), Ordering::Less);
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
    }
}
