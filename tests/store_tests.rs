mod common;

#[cfg(test)]
pub mod store_tests {
    use serde_json::json;

    use super::common::*;

    use maagap::common::*;
    use maagap::db::*;
    use maagap::models::*;

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let store = MemoryDocumentStore::new();

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

        let all: Vec<_> = list_custom_pages(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.data.title)
            .collect();
        assert_eq!(all, vec!["Hidden", "Contact", "Events"]);

        let nav: Vec<_> = list_nav_pages(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.data.slug)
            .collect();
        assert_eq!(nav, vec!["contact", "events"]);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let store = MemoryDocumentStore::new();

        let result =
            query_documents::<Banner>(&store, &Query::new().filter("no_such_field", true)).await;

        assert!(matches!(result, Err(StoreError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_silent() {
        let store = MemoryDocumentStore::new();
        let banner = create_banner(
            &store,
            &BannerCreate {
                title: "Welcome".to_string(),
                description: String::new(),
                image_url: String::new(),
                link: String::new(),
                active: true,
            },
        )
        .await
        .unwrap();

        let deleted = delete_banner(&store, &DocumentId::from("does-not-exist"))
            .await
            .unwrap();
        assert!(!deleted);

        let remaining = list_banners(&store).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, banner.id);
    }

    #[tokio::test]
    async fn test_toggle_banner_flips_active() {
        let store = MemoryDocumentStore::new();
        let banner = create_banner(
            &store,
            &BannerCreate {
                title: "Fiesta".to_string(),
                description: String::new(),
                image_url: "/uploads/banners/1_fiesta.png".to_string(),
                link: String::new(),
                active: true,
            },
        )
        .await
        .unwrap();

        let toggled = toggle_banner(&store, &banner.id).await.unwrap().unwrap();
        assert!(!toggled.active);
        assert!(list_active_banners(&store).await.unwrap().is_empty());

        let missing = toggle_banner(&store, &DocumentId::from("gone")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_singletons_default_until_saved() {
        let store = MemoryDocumentStore::new();

        let settings = get_website_settings(&store).await.unwrap();
        assert_eq!(settings, WebsiteSettings::default());

        let saved = save_website_settings(
            &store,
            &WebsiteSettings {
                motto: "Faith in action".to_string(),
                maintenance_mode: true,
                ..WebsiteSettings::default()
            },
        )
        .await
        .unwrap();
        assert!(saved.updated_at.is_some());

        let loaded = get_website_settings(&store).await.unwrap();
        assert_eq!(loaded.motto, "Faith in action");
        assert!(loaded.maintenance_mode);
        assert_eq!(store.count(WebsiteSettings::COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_malformed_documents_are_skipped() {
        let store = MemoryDocumentStore::new();
        store
            .insert(Banner::COLLECTION, json!({ "title": 42, "active": "yes" }))
            .await
            .unwrap();
        create_banner(
            &store,
            &BannerCreate {
                title: "Valid".to_string(),
                description: String::new(),
                image_url: String::new(),
                link: String::new(),
                active: true,
            },
        )
        .await
        .unwrap();

        let banners = list_banners(&store).await.unwrap();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].title, "Valid");
    }

    #[tokio::test]
    async fn test_toggle_member_status() {
        let store = MemoryDocumentStore::new();
        let member = create_member(&store, &get_seed_member("Rosa", "Reyes", "rosa@example.com"))
            .await
            .unwrap();

        let toggled = toggle_member_status(&store, &member.id).await.unwrap().unwrap();
        assert_eq!(toggled.status, MemberStatus::Inactive);
        assert!(list_active_members(&store).await.unwrap().is_empty());

        let toggled = toggle_member_status(&store, &member.id).await.unwrap().unwrap();
        assert_eq!(toggled.status, MemberStatus::Active);
    }

    #[tokio::test]
    async fn test_admin_email_lookup_ignores_case() {
        let store = MemoryDocumentStore::new();
        create_admin(&store, "Admin@Example.com", "hash").await.unwrap();

        let found = get_admin_by_email(&store, "  admin@example.COM ").await.unwrap();
        assert_eq!(found.map(|a| a.data.email), Some("admin@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let store = MemoryDocumentStore::new();
        store.set_fail_reads(true);

        assert!(matches!(
            list_banners(&store).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
