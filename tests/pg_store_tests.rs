#![cfg(feature = "pg-tests")]

mod common;

#[cfg(test)]
pub mod pg_store_tests {
    use serde_json::json;
    use sqlx::PgPool;

    use super::common::*;

    use maagap::db::*;
    use maagap::models::*;
    use maagap::services;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_get_put_delete(pool: PgPool) {
        let store = PgDocumentStore::from_pool(pool);

        let id = store
            .insert("scratch", json!({ "name": "first", "rank": 2 }))
            .await
            .unwrap();
        let doc = store.get("scratch", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "first");

        store
            .put("scratch", &id, json!({ "name": "second" }))
            .await
            .unwrap();
        let doc = store.get("scratch", &id).await.unwrap().unwrap();
        assert_eq!(doc.data, json!({ "name": "second" }));

        assert!(store.delete("scratch", &id).await.unwrap());
        assert!(!store.delete("scratch", &id).await.unwrap());
        assert!(store.get("scratch", &id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_query_filters_and_orders(pool: PgPool) {
        let store = PgDocumentStore::from_pool(pool);

        for (title, order, nav) in [("Events", 3, true), ("Hidden", 1, false), ("Contact", 2, true)] {
            create_custom_page(
                &store,
                &CustomPageCreate {
                    title: title.to_string(),
                    slug: String::new(),
                    content: String::new(),
                    order,
                    show_in_nav: nav,
                },
            )
            .await
            .unwrap();
        }

        let nav: Vec<_> = list_nav_pages(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.data.slug)
            .collect();
        assert_eq!(nav, vec!["contact", "events"]);

        let page = get_page_by_slug(&store, "hidden").await.unwrap().unwrap();
        assert_eq!(page.title, "Hidden");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_financial_records_by_date(pool: PgPool) {
        let store = PgDocumentStore::from_pool(pool);

        for (day, amount) in [("2026-01-05", "10"), ("2026-03-01", "30"), ("2026-02-14", "20")] {
            create_financial_record(
                &store,
                &FinancialRecordCreate {
                    kind: TransactionKind::In,
                    amount: amount.parse().unwrap(),
                    category: "Dues".to_string(),
                    description: String::new(),
                    date: date(day),
                },
            )
            .await
            .unwrap();
        }

        let records = list_financial_records(&store).await.unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-03-01", "2026-02-14", "2026-01-05"]);

        let summary = services::summarize(records.iter().map(|r| &r.data));
        assert_eq!(summary.balance.to_string(), "60.000");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_singleton_overwrite(pool: PgPool) {
        let store = PgDocumentStore::from_pool(pool);

        save_history_content(
            &store,
            &HistoryContent {
                beginning: "First".to_string(),
                ..HistoryContent::default()
            },
        )
        .await
        .unwrap();
        save_history_content(
            &store,
            &HistoryContent {
                beginning: "Second".to_string(),
                ..HistoryContent::default()
            },
        )
        .await
        .unwrap();

        let history = get_history_content(&store).await.unwrap();
        assert_eq!(history.beginning, "Second");
        assert_eq!(store.query(HistoryContent::COLLECTION, &Query::new()).await.unwrap().len(), 1);
    }
}
