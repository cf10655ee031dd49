//! The client data layer against a live server: cache population, the
//! local-mutation invalidation path, and the broadcast-event path.

use ipotrack::client::{ClientError, IpoClient, ListParams};
use ipotrack::config::Config;
use ipotrack::domain::NotificationEvent;
use serde_json::json;

async fn spawn_server() -> String {
    let db_path =
        std::env::temp_dir().join(format!("ipotrack-client-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    // The test server speaks plain HTTP; a Secure cookie would never come back.
    config.server.secure_cookies = false;

    let state = ipotrack::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let app = ipotrack::api::router(state).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    format!("http://{addr}")
}

async fn admin_client(base_url: &str) -> IpoClient {
    let client = IpoClient::new(base_url).unwrap();
    client.login("admin", "admin123").await.expect("admin login");
    client
}

#[tokio::test]
async fn unauthenticated_mutations_are_rejected() {
    let base_url = spawn_server().await;
    let client = IpoClient::new(base_url.as_str()).unwrap();

    let err = client
        .create_ipo(json!({"company_name": "Nope Ltd."}))
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn local_mutations_invalidate_the_callers_cache_immediately() {
    let base_url = spawn_server().await;
    let client = admin_client(&base_url).await;

    let params = ListParams::default();

    // Prime the list cache while the store is empty.
    assert_eq!(client.list_ipos(&params).await.unwrap().len(), 0);
    assert_eq!(client.cache().len(), 1);

    // A local create invalidates the cached list; the next read sees the
    // new record without waiting for any broadcast.
    let created = client
        .create_ipo(json!({"company_name": "Nova Agritech Ltd."}))
        .await
        .unwrap();

    let listed = client.list_ipos(&params).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    // Same for update...
    let updated = client
        .update_ipo(&created.id, json!({"status": "closed"}))
        .await
        .unwrap();
    assert_eq!(
        client.get_ipo(&created.id).await.unwrap().status,
        updated.status
    );

    // ...and delete.
    client.delete_ipo(&created.id).await.unwrap();
    assert_eq!(client.list_ipos(&params).await.unwrap().len(), 0);

    let err = client.get_ipo(&created.id).await.unwrap_err();
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn broadcast_events_converge_other_clients_caches() {
    let base_url = spawn_server().await;
    let writer = admin_client(&base_url).await;
    let reader = admin_client(&base_url).await;

    let created = writer
        .create_ipo(json!({"company_name": "EPACK Durable Ltd."}))
        .await
        .unwrap();

    // The reader caches the record as-is.
    let before = reader.get_ipo(&created.id).await.unwrap();
    assert_eq!(before.status, created.status);

    // Another client mutates. The reader still serves its stale cache:
    // there is no read-after-write strictness between commit and broadcast.
    let updated = writer
        .update_ipo(&created.id, json!({"status": "listed"}))
        .await
        .unwrap();
    let stale = reader.get_ipo(&created.id).await.unwrap();
    assert_eq!(stale.status, before.status);

    // Delivery of the broadcast event converges the reader within one
    // round-trip.
    reader.apply_event(&NotificationEvent::IpoUpdated(updated.clone()));
    let fresh = reader.get_ipo(&created.id).await.unwrap();
    assert_eq!(fresh.status, updated.status);

    // A delete event drops the record from the cache too.
    writer.delete_ipo(&created.id).await.unwrap();
    reader.apply_event(&NotificationEvent::IpoDeleted {
        id: created.id.clone(),
    });
    let err = reader.get_ipo(&created.id).await.unwrap_err();
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_cache_is_keyed_by_filter_parameters() {
    let base_url = spawn_server().await;
    let client = admin_client(&base_url).await;

    client
        .create_ipo(json!({"company_name": "Upcoming Ltd.", "status": "upcoming"}))
        .await
        .unwrap();
    client
        .create_ipo(json!({"company_name": "Closed Ltd.", "status": "closed"}))
        .await
        .unwrap();

    let all = ListParams::default();
    let upcoming_only = ListParams {
        status: Some("upcoming".to_string()),
        ..Default::default()
    };

    assert_eq!(client.list_ipos(&all).await.unwrap().len(), 2);
    assert_eq!(client.list_ipos(&upcoming_only).await.unwrap().len(), 1);

    // Both filter keys are cached independently.
    assert_eq!(client.list_ipos(&all).await.unwrap().len(), 2);
    assert_eq!(client.list_ipos(&upcoming_only).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stats_and_applications_round_trip() {
    let base_url = spawn_server().await;
    let client = admin_client(&base_url).await;

    let created = client
        .create_ipo(json!({"company_name": "Nova Agritech Ltd."}))
        .await
        .unwrap();

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.upcoming, 1);

    let application = client.apply_to_ipo(&created.id, 365, 14965.0).await.unwrap();
    assert_eq!(application.ipo_id, created.id);
    assert_eq!(application.shares, 365);
}
