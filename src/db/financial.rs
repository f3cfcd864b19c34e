use chrono::Utc;

use super::{
    delete_document, insert_document, query_documents, Direction, DocumentId, DocumentStore, Query,
    Record,
};
use crate::common::StoreError;
use crate::models::{FinancialRecord, FinancialRecordCreate};

pub async fn list_financial_records(
    store: &dyn DocumentStore,
) -> Result<Vec<Record<FinancialRecord>>, StoreError> {
    query_documents(store, &Query::new().order_by("date", Direction::Desc)).await
}

pub async fn create_financial_record(
    store: &dyn DocumentStore,
    data: &FinancialRecordCreate,
) -> Result<Record<FinancialRecord>, StoreError> {
    let record = FinancialRecord {
        kind: data.kind,
        amount: data.amount,
        category: data.category.clone(),
        description: data.description.clone(),
        date: data.date,
        created_at: Utc::now(),
    };

    insert_document(store, &record).await
}

pub async fn delete_financial_record(
    store: &dyn DocumentStore,
    id: &DocumentId,
) -> Result<bool, StoreError> {
    delete_document::<FinancialRecord>(store, id).await
}
