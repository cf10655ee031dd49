//! Fan-out behavior of the notification broadcaster, driven through the
//! real mutation endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use ipotrack::config::Config;
use ipotrack::domain::{Broadcaster, NotificationEvent};
use ipotrack::state::SharedState;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

async fn spawn_app_with_bus() -> (Router, Broadcaster) {
    let db_path =
        std::env::temp_dir().join(format!("ipotrack-bus-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;

    let broadcaster = Broadcaster::new(config.general.event_bus_buffer_size);
    let shared = Arc::new(
        SharedState::with_broadcaster(config, broadcaster.clone())
            .await
            .expect("failed to create shared state"),
    );
    let state = ipotrack::api::create_app_state(shared, None)
        .await
        .expect("failed to create app state");

    (ipotrack::api::router(state).await, broadcaster)
}

async fn admin_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "admin123"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn create_ipo(app: &Router, cookie: &str, company_name: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ipos")
                .header("Content-Type", "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(json!({"company_name": company_name}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_fans_out_exactly_one_event_per_open_connection() {
    let (app, bus) = spawn_app_with_bus().await;
    let cookie = admin_cookie(&app).await;

    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    create_ipo(&app, &cookie, "Nova Agritech Ltd.").await;

    for rx in [&mut first, &mut second] {
        match rx.try_recv().expect("each open connection gets the event") {
            NotificationEvent::IpoCreated(record) => {
                assert_eq!(record.company_name, "Nova Agritech Ltd.");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        // Exactly one event, not two.
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}

#[tokio::test]
async fn a_connection_closed_before_the_broadcast_receives_nothing() {
    let (app, bus) = spawn_app_with_bus().await;
    let cookie = admin_cookie(&app).await;

    let mut open = bus.subscribe();
    let closed = bus.subscribe();
    drop(closed);

    assert_eq!(bus.receiver_count(), 1);

    create_ipo(&app, &cookie, "EPACK Durable Ltd.").await;

    assert!(matches!(
        open.try_recv().unwrap(),
        NotificationEvent::IpoCreated(_)
    ));
    assert_eq!(bus.receiver_count(), 1);
}

#[tokio::test]
async fn update_and_delete_emit_matching_events() {
    let (app, bus) = spawn_app_with_bus().await;
    let cookie = admin_cookie(&app).await;

    let id = create_ipo(&app, &cookie, "Piyush Steel Ltd.").await;

    let mut rx = bus.subscribe();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/ipos/{id}"))
                .header("Content-Type", "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(json!({"status": "closed"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    match rx.try_recv().unwrap() {
        NotificationEvent::IpoUpdated(record) => {
            assert_eq!(record.id, id);
            assert_eq!(record.status, ipotrack::models::IpoStatus::Closed);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/ipos/{id}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    match rx.try_recv().unwrap() {
        NotificationEvent::IpoDeleted { id: deleted } => assert_eq!(deleted, id),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_mutations_emit_no_events() {
    let (app, bus) = spawn_app_with_bus().await;
    let cookie = admin_cookie(&app).await;

    let mut rx = bus.subscribe();

    // Validation failure.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ipos")
                .header("Content-Type", "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(json!({"sector": "Finance"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete of a missing record.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/ipos/no-such-id")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}
