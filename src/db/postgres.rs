use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};

use std::time::Duration;

use super::{DocumentId, DocumentStore, Query, StoredDocument};
use crate::common::StoreError;

/// Document store backed by a single JSONB table.
pub struct PgDocumentStore {
    pub pool: PgPool,
}

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Value>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: DocumentId::new(row.id),
            data: row.data.0,
        }
    }
}

impl PgDocumentStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(id.as_str())
        .bind(Json(data))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn put(&self, collection: &str, id: &DocumentId, data: Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE
            SET
                data = EXCLUDED.data,
                edited_at = now()
            "#,
        )
        .bind(collection)
        .bind(id.as_str())
        .bind(Json(data))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredDocument::from))
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, data FROM documents WHERE collection = ");
        query_builder.push_bind(collection);

        for (field, value) in &query.filters {
            query_builder
                .push(" AND data -> ")
                .push_bind(field.clone())
                .push(" = ")
                .push_bind(Json(value.clone()));
        }

        // Field names are bound as parameters, never spliced into the SQL.
        match &query.order {
            Some(order) => {
                query_builder
                    .push(" ORDER BY data -> ")
                    .push_bind(order.field.clone())
                    .push(" ")
                    .push(order.direction.as_sql())
                    .push(", seq ASC");
            }
            None => {
                query_builder.push(" ORDER BY seq ASC");
            }
        }

        let rows = query_builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<bool, StoreError> {
        let deleted = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            RETURNING id
            "#,
        )
        .bind(collection)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }
}
