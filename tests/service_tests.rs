mod common;

#[cfg(test)]
pub mod service_tests {
    use super::common::*;

    use maagap::common::*;
    use maagap::db::*;
    use maagap::models::*;
    use maagap::services::*;
    use maagap::storage::*;

    fn transaction(kind: TransactionKind, amount: &str) -> FinancialRecord {
        FinancialRecord {
            kind,
            amount: amount.parse().unwrap(),
            category: "Dues".to_string(),
            description: String::new(),
            date: date("2026-01-10"),
            created_at: parse_time("2026-01-10T08:00:00Z"),
        }
    }

    #[test]
    fn test_balance_is_income_minus_expenses() {
        let sets: Vec<Vec<(TransactionKind, &str)>> = vec![
            vec![],
            vec![(TransactionKind::In, "100")],
            vec![(TransactionKind::Out, "12.5")],
            vec![
                (TransactionKind::In, "250.125"),
                (TransactionKind::Out, "40.1"),
                (TransactionKind::In, "0.005"),
                (TransactionKind::Out, "300"),
            ],
        ];

        for set in sets {
            let records: Vec<_> = set.iter().map(|(k, a)| transaction(*k, a)).collect();
            let summary = summarize(&records);

            let income: Amount = records
                .iter()
                .filter(|r| r.kind == TransactionKind::In)
                .map(|r| r.amount)
                .sum();
            let expenses: Amount = records
                .iter()
                .filter(|r| r.kind == TransactionKind::Out)
                .map(|r| r.amount)
                .sum();

            assert_eq!(summary.income, income);
            assert_eq!(summary.expenses, expenses);
            assert_eq!(summary.balance, income - expenses);
            assert_eq!(
                summary.balance,
                records.iter().map(FinancialRecord::signed_amount).sum::<Amount>()
            );
        }
    }

    #[test]
    fn test_balance_keeps_three_decimals() {
        let records = vec![
            transaction(TransactionKind::In, "10.001"),
            transaction(TransactionKind::Out, "20"),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.balance.to_string(), "-9.999");
        assert!(summary.balance.is_negative());
    }

    #[test]
    fn test_largest_amounts_sum_exactly() {
        let records = vec![
            transaction(TransactionKind::In, "1000000000000"),
            transaction(TransactionKind::In, "1000000000000"),
            transaction(TransactionKind::Out, "1000000000000"),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.income.to_string(), "2000000000000.000");
        assert_eq!(summary.expenses.to_string(), "1000000000000.000");
        assert_eq!(summary.balance, Amount::MAX);
        assert!("9000000000000000".parse::<Amount>().is_err());
    }

    #[tokio::test]
    async fn test_registration_derives_age_from_birth_year() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();
        let now = parse_time("2026-02-01T10:00:00Z");

        let mut member = get_seed_member("Liza", "Soberano", "liza@example.com");
        member.member_type = MemberType::Associate;
        member.date_of_birth = Some(date("1998-12-31"));
        member.age = None;
        member.status = MemberStatus::Inactive;

        let saved = register_member(
            &store,
            &objects,
            Registration {
                member,
                photo: None,
            },
            now,
        )
        .await
        .unwrap();

        // Year difference only; the birthday has not come yet in 2026.
        assert_eq!(saved.age, Some(28));
        assert_eq!(saved.member_type, MemberType::Associate);
        assert_eq!(saved.status, MemberStatus::Active);
        assert_eq!(saved.registration_date, now);
        assert_eq!(saved.created_at, now);
        assert_eq!(objects.count(), 0);
    }

    #[tokio::test]
    async fn test_registration_keeps_supplied_age_and_uploads_photo() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();

        let mut member = get_seed_member("Paolo", "Reyes", "paolo@example.com");
        member.age = Some(40);

        let saved = register_member(
            &store,
            &objects,
            Registration {
                member,
                photo: Some(UploadedFile {
                    file_name: "my photo.jpg".to_string(),
                    content_type: Some("image/jpeg".to_string()),
                    bytes: vec![0xFF, 0xD8, 0xFF],
                }),
            },
            parse_time("2026-02-01T10:00:00Z"),
        )
        .await
        .unwrap();

        assert_eq!(saved.age, Some(40));
        assert!(saved.photo_url.starts_with("memory://member-photos/"));
        assert!(saved.photo_url.ends_with("_my_photo.jpg"));
        assert_eq!(objects.count(), 1);
    }

    #[tokio::test]
    async fn test_registration_missing_field_writes_nothing() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();

        let mut member = get_seed_member("Ana", "Cruz", "ana@example.com");
        member.emergency_tel_cp_no = "   ".to_string();

        let result = register_member(
            &store,
            &objects,
            Registration {
                member,
                photo: None,
            },
            parse_time("2026-02-01T10:00:00Z"),
        )
        .await;

        assert!(matches!(
            result,
            Err(WriteError::Form(FormError::Missing("emergency_tel_cp_no")))
        ));
        assert_eq!(store.count(Member::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_stops_registration() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();
        objects.set_failing(true);

        let result = register_member(
            &store,
            &objects,
            Registration {
                member: get_seed_member("Ben", "Lim", "ben@example.com"),
                photo: Some(UploadedFile {
                    file_name: "ben.png".to_string(),
                    content_type: Some("image/png".to_string()),
                    bytes: vec![1, 2, 3],
                }),
            },
            parse_time("2026-02-01T10:00:00Z"),
        )
        .await;

        assert!(matches!(result, Err(WriteError::Upload(_))));
        assert_eq!(store.count(Member::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_accepted_and_flagged() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();
        let now = parse_time("2026-02-01T10:00:00Z");

        for _ in 0..2 {
            register_member(
                &store,
                &objects,
                Registration {
                    member: get_seed_member("Carlo", "Tan", "carlo@example.com"),
                    photo: None,
                },
                now,
            )
            .await
            .unwrap();
        }

        let members = list_members(&store).await.unwrap();
        assert_eq!(members.len(), 2);

        let duplicates = duplicate_emails(&members);
        assert!(members.iter().all(|m| is_duplicate(&duplicates, m)));
    }

    #[tokio::test]
    async fn test_email_uses_ignore_case_and_whitespace() {
        let store = MemoryDocumentStore::new();
        let objects = MemoryObjectStore::new();
        let now = parse_time("2026-02-01T10:00:00Z");

        register_member(
            &store,
            &objects,
            Registration {
                member: get_seed_member("Juan", "Luna", "juan@example.com"),
                photo: None,
            },
            now,
        )
        .await
        .unwrap();

        assert_eq!(count_email_uses(&store, "Juan@Example.com").await.unwrap(), 1);
        assert_eq!(count_email_uses(&store, "  JUAN@example.COM ").await.unwrap(), 1);
        assert_eq!(count_email_uses(&store, "juana@example.com").await.unwrap(), 0);
        assert_eq!(count_email_uses(&store, "   ").await.unwrap(), 0);

        register_member(
            &store,
            &objects,
            Registration {
                member: get_seed_member("Juan", "Luna", "Juan@Example.com"),
                photo: None,
            },
            now,
        )
        .await
        .unwrap();

        assert_eq!(count_email_uses(&store, "juan@example.com").await.unwrap(), 2);
        let members = list_members(&store).await.unwrap();
        let duplicates = duplicate_emails(&members);
        assert!(members.iter().all(|m| is_duplicate(&duplicates, m)));
    }

    #[tokio::test]
    async fn test_page_without_slug_gets_derived_slug_and_duplicates_are_kept() {
        let store = MemoryDocumentStore::new();

        for _ in 0..2 {
            create_custom_page(
                &store,
                &CustomPageCreate {
                    title: "Youth  Ministry Events".to_string(),
                    slug: String::new(),
                    content: "<p>Soon</p>".to_string(),
                    order: 0,
                    show_in_nav: true,
                },
            )
            .await
            .unwrap();
        }

        let pages = list_custom_pages(&store).await.unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.slug == "youth-ministry-events"));
        assert!(duplicate_slugs(&pages).contains("youth-ministry-events"));

        let first = get_page_by_slug(&store, "youth-ministry-events")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.id, pages[0].id);
    }

    #[tokio::test]
    async fn test_member_search_matches_name_or_email() {
        let store = MemoryDocumentStore::new();
        for (first, last, email) in [
            ("Maria", "Clara", "mc@example.com"),
            ("Jose", "Rizal", "JOSE.R@Example.com"),
            ("Andres", "Bonifacio", "andres@example.com"),
        ] {
            create_member(&store, &get_seed_member(first, last, email))
                .await
                .unwrap();
        }
        let members = list_members(&store).await.unwrap();

        let names = |q: &str| {
            let filter = MemberFilter::from_params(Some(q), Some("All"), Some("All"));
            let mut names: Vec<_> = members
                .iter()
                .filter(|m| filter.matches(m))
                .map(|m| m.first_name.clone())
                .collect();
            names.sort();
            names
        };

        assert_eq!(names("MARIA clara"), vec!["Maria"]);
        assert_eq!(names("jose.r@"), vec!["Jose"]);
        assert_eq!(names("example.com"), vec!["Andres", "Jose", "Maria"]);
        assert!(names("nobody").is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let store = MemoryDocumentStore::new();
        let admin = create_admin(&store, "admin@example.com", "hash").await.unwrap();
        let session = start_session(&store, &admin.id).await.unwrap();

        assert!(resolve_session(&store, &session.id).await.unwrap().is_some());

        let expired = AdminSession {
            expires_at: parse_time("2020-01-01T00:00:00Z"),
            ..session.data.clone()
        };
        put_document(&store, &session.id, &expired).await.unwrap();

        assert!(resolve_session(&store, &session.id).await.unwrap().is_none());
        assert!(get_admin_session(&store, &session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_and_bootstrap() {
        let store = MemoryDocumentStore::new();

        assert!(bootstrap_admin(&store, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap());
        assert!(!bootstrap_admin(&store, ADMIN_EMAIL, "other").await.unwrap());

        assert!(authenticate(&store, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap()
            .is_some());
        assert!(authenticate(&store, ADMIN_EMAIL, "wrong").await.unwrap().is_none());
        assert!(authenticate(&store, "nobody@example.com", ADMIN_PASSWORD)
            .await
            .unwrap()
            .is_none());
    }
}
