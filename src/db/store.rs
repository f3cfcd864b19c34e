use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use std::fmt;

use crate::common::StoreError;

/// Opaque document id. Generated ids are UUID v4 in simple form; singleton
/// documents use fixed keys such as `website`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

/// Conjunction of top-level equality filters plus an optional ordering.
/// Documents that compare equal keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order: Option<Order>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            field: field.into(),
            direction,
        });
        self
    }

    /// Every field name the query touches.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(|(field, _)| field.as_str())
            .chain(self.order.iter().map(|o| o.field.as_str()))
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    /// Writes a new document under a generated id.
    async fn insert(&self, collection: &str, data: Value) -> Result<DocumentId, StoreError>;

    /// Creates or fully overwrites the document stored under `id`.
    async fn put(&self, collection: &str, id: &DocumentId, data: Value) -> Result<(), StoreError>;

    async fn get(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError>;

    /// Returns `false` when nothing was stored under `id`; a missing
    /// document is not an error.
    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<bool, StoreError>;
}
