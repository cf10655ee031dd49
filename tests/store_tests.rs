//! Store-level behavior: patch semantics, filtering, search, counts, and
//! the account and application repositories.

use ipotrack::config::SecurityConfig;
use ipotrack::db::Store;
use ipotrack::models::{
    IpoDraft, IpoPatch, IpoStatus, IssueType, ListFilter, NewApplication, NewUser, Role,
};

async fn spawn_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("ipotrack-store-test-{}.db", uuid::Uuid::new_v4()));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

fn draft(company_name: &str) -> IpoDraft {
    IpoDraft {
        company_name: company_name.to_string(),
        ..Default::default()
    }
}

/// Lighter Argon2 parameters so account tests stay quick.
fn test_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
        min_password_length: 8,
    }
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let store = spawn_store().await;

    let created = store
        .create_ipo(&IpoDraft {
            company_name: "Nova Agritech Ltd.".to_string(),
            sector: Some("Technology".to_string()),
            min_price: Some(39.0),
            max_price: Some(41.0),
            status: IpoStatus::Upcoming,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get_ipo(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn patch_changes_named_fields_and_clears_on_explicit_null() {
    let store = spawn_store().await;

    let created = store
        .create_ipo(&IpoDraft {
            company_name: "EPACK Durable Ltd.".to_string(),
            sector: Some("Manufacturing".to_string()),
            min_price: Some(218.0),
            status: IpoStatus::Ongoing,
            ..Default::default()
        })
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let patch = IpoPatch {
        status: Some(IpoStatus::Closed),
        sector: Some(None),
        ..Default::default()
    };
    let updated = store.update_ipo(&created.id, &patch).await.unwrap().unwrap();

    assert_eq!(updated.status, IpoStatus::Closed);
    assert_eq!(updated.sector, None);
    // Untouched fields survive.
    assert_eq!(updated.company_name, created.company_name);
    assert_eq!(updated.min_price, created.min_price);
    assert_eq!(updated.created_at, created.created_at);
    assert_ne!(updated.updated_at, created.updated_at);
}

#[tokio::test]
async fn update_of_missing_id_returns_none() {
    let store = spawn_store().await;
    let patch = IpoPatch {
        status: Some(IpoStatus::Closed),
        ..Default::default()
    };
    assert!(store.update_ipo("no-such-id", &patch).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_returns_true_then_false() {
    let store = spawn_store().await;
    let created = store.create_ipo(&draft("Piyush Steel Ltd.")).await.unwrap();

    assert!(store.delete_ipo(&created.id).await.unwrap());
    assert!(!store.delete_ipo(&created.id).await.unwrap());
    assert!(store.get_ipo(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_filters_combine_and_order_newest_first() {
    let store = spawn_store().await;

    for (name, sector, status) in [
        ("Alpha Ltd.", "Finance", IpoStatus::Upcoming),
        ("Beta Ltd.", "Technology", IpoStatus::Upcoming),
        ("Gamma Ltd.", "Finance", IpoStatus::Upcoming),
        ("Delta Ltd.", "Finance", IpoStatus::Closed),
    ] {
        store
            .create_ipo(&IpoDraft {
                company_name: name.to_string(),
                sector: Some(sector.to_string()),
                status,
                ..Default::default()
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = store.list_ipos(&ListFilter::default()).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].company_name, "Delta Ltd.");

    let filter = ListFilter {
        status: Some(IpoStatus::Upcoming),
        sector: Some("Finance".to_string()),
    };
    let filtered = store.list_ipos(&filter).await.unwrap();
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].company_name, "Gamma Ltd.");
    assert_eq!(filtered[1].company_name, "Alpha Ltd.");
}

#[tokio::test]
async fn search_covers_name_issue_type_status_and_sector() {
    let store = spawn_store().await;

    store
        .create_ipo(&IpoDraft {
            company_name: "Nova Agritech Ltd.".to_string(),
            sector: Some("Agritech".to_string()),
            issue_type: Some(IssueType::BookBuilding),
            status: IpoStatus::Upcoming,
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .create_ipo(&IpoDraft {
            company_name: "EPACK Durable Ltd.".to_string(),
            sector: Some("Manufacturing".to_string()),
            issue_type: Some(IssueType::FixedPrice),
            status: IpoStatus::Closed,
            ..Default::default()
        })
        .await
        .unwrap();

    let by_name = store.search_ipos("nova").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].company_name, "Nova Agritech Ltd.");

    let by_issue_type = store.search_ipos("fixed").await.unwrap();
    assert_eq!(by_issue_type.len(), 1);
    assert_eq!(by_issue_type[0].company_name, "EPACK Durable Ltd.");

    let by_status = store.search_ipos("closed").await.unwrap();
    assert_eq!(by_status.len(), 1);

    let by_sector = store.search_ipos("AGRI").await.unwrap();
    assert_eq!(by_sector.len(), 1);

    assert_eq!(store.search_ipos("zzz").await.unwrap().len(), 0);
}

#[tokio::test]
async fn counts_group_by_status() {
    let store = spawn_store().await;

    for status in [
        IpoStatus::Upcoming,
        IpoStatus::Upcoming,
        IpoStatus::Ongoing,
        IpoStatus::Listed,
    ] {
        store
            .create_ipo(&IpoDraft {
                company_name: format!("{status} Ltd."),
                status,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let counts = store.ipo_status_counts().await.unwrap();
    assert_eq!(counts.total, 4);
    assert_eq!(counts.upcoming, 2);
    assert_eq!(counts.ongoing, 1);
    assert_eq!(counts.listed, 1);
    assert_eq!(counts.closed, 0);
}

#[tokio::test]
async fn migration_seeds_an_admin_account() {
    let store = spawn_store().await;

    let admin = store.get_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert!(store.verify_user_password("admin", "admin123").await.unwrap());
    assert!(!store.verify_user_password("admin", "wrong").await.unwrap());
}

#[tokio::test]
async fn created_users_verify_their_own_password_only() {
    let store = spawn_store().await;
    let security = test_security();

    let user = store
        .create_user(
            &NewUser {
                username: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
                password: "correct horse".to_string(),
                role: Role::User,
            },
            &security,
        )
        .await
        .unwrap();

    assert_eq!(user.role, Role::User);
    assert!(store.username_exists("alice").await.unwrap());
    assert!(store.email_exists("alice@example.com").await.unwrap());
    assert!(
        store
            .verify_user_password("alice", "correct horse")
            .await
            .unwrap()
    );
    assert!(!store.verify_user_password("alice", "battery staple").await.unwrap());
    assert!(!store.verify_user_password("nobody", "anything").await.unwrap());
}

#[tokio::test]
async fn password_update_replaces_the_hash_wholesale() {
    let store = spawn_store().await;
    let security = test_security();

    store
        .create_user(
            &NewUser {
                username: "bob".to_string(),
                email: None,
                password: "old password".to_string(),
                role: Role::User,
            },
            &security,
        )
        .await
        .unwrap();

    store
        .update_user_password("bob", "new password", &security)
        .await
        .unwrap();

    assert!(!store.verify_user_password("bob", "old password").await.unwrap());
    assert!(store.verify_user_password("bob", "new password").await.unwrap());
}

#[tokio::test]
async fn applications_append_and_list_per_user_and_per_ipo() {
    let store = spawn_store().await;
    let security = test_security();

    let ipo = store.create_ipo(&draft("Nova Agritech Ltd.")).await.unwrap();
    let user = store
        .create_user(
            &NewUser {
                username: "investor".to_string(),
                email: None,
                password: "password123".to_string(),
                role: Role::User,
            },
            &security,
        )
        .await
        .unwrap();

    for shares in [365, 730] {
        store
            .create_application(&NewApplication {
                ipo_id: ipo.id.clone(),
                user_id: user.id.clone(),
                shares,
                amount: f64::from(shares) * 41.0,
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let for_user = store.applications_for_user(&user.id).await.unwrap();
    assert_eq!(for_user.len(), 2);
    // Newest first.
    assert_eq!(for_user[0].shares, 730);

    let for_ipo = store.applications_for_ipo(&ipo.id).await.unwrap();
    assert_eq!(for_ipo.len(), 2);

    assert_eq!(store.applications_for_user("nobody").await.unwrap().len(), 0);
}
