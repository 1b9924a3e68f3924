//! Drives the live viewer router end to end.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use snapview::{AppState, ChatTime, router};
use time::macros::{datetime, offset};
use tower::ServiceExt;

fn app(export: &common::Export) -> axum::Router {
    let state = AppState::new(export.data_dir(), offset!(UTC), ChatTime::Clock)
        .with_now(datetime!(2024-03-10 18:00 UTC));
    router(state, export.web_root())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = location.unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
    (status, body)
}

#[tokio::test]
async fn root_redirects_to_latest_day() {
    let export = common::export();
    let (status, location) = get(app(&export), "/").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location, "/day/2024-03-10");
}

#[tokio::test]
async fn day_page_orders_chats_by_recency() {
    let export = common::export();
    let (status, html) = get(app(&export), "/day/2024-03-09").await;
    assert_eq!(status, StatusCode::OK);
    let group = html.find(r#"href="/day/2024-03-09/g42""#).unwrap();
    let sam = html.find(r#"href="/day/2024-03-09/sam""#).unwrap();
    assert!(group < sam);
    assert!(html.contains("Saturday, March 9, 2024"));
    assert!(html.contains(r#"src="/public/avatars/sam.png""#));
}

#[tokio::test]
async fn conversation_and_gallery_views() {
    let export = common::export();
    let (status, html) = get(app(&export), "/day/2024-03-09/sam").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("pizza tonight?"));
    assert!(html.contains("Sam Rivera"));
    assert!(html.contains(">Me<"));
    assert!(html.contains("[IMAGE]"));
    assert!(html.contains(r#"href="/day/2024-03-09/sam?view=gallery""#));

    let (status, html) = get(app(&export), "/day/2024-03-09/sam?view=gallery").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("gallery-grid"));
    assert!(html.contains(r#"href="/day/2024-03-09/sam/media/0""#));
    assert!(!html.contains("pizza tonight?"));
}

#[tokio::test]
async fn unknown_view_falls_back_to_messages() {
    let export = common::export();
    let (status, html) = get(app(&export), "/day/2024-03-09/sam?view=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("pizza tonight?"));
    assert!(!html.contains("gallery-grid"));
}

#[tokio::test]
async fn media_viewer_links_back_to_message() {
    let export = common::export();
    let (status, html) = get(app(&export), "/day/2024-03-09/sam/media/0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"src="/public/media/s3.jpg""#));
    assert!(html.contains(r#"href="/day/2024-03-09/sam#message-s3""#));
    assert!(html.contains("ArrowRight: '.media-viewer-next'"));

    let (status, _) = get(app(&export), "/day/2024-03-09/sam/media/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let export = common::export();
    for uri in ["/day/1999-01-01", "/day/2024-03-09/nobody", "/nowhere"] {
        let (status, html) = get(app(&export), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(html.contains("Not found"), "{uri}");
    }
}

#[tokio::test]
async fn json_api() {
    let export = common::export();
    let (status, body) = get(app(&export), "/api/days").await;
    assert_eq!(status, StatusCode::OK);
    let days: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(days, vec!["2024-03-09", "2024-03-10"]);

    let (_, body) = get(app(&export), "/api/index").await;
    let index: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(index["owner"], "me");

    let (_, body) = get(app(&export), "/api/days/2024-03-09/sam/messages").await;
    let messages: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(messages.as_array().unwrap().len(), 3);
    assert_eq!(messages[0]["timestamp"], 1_709_989_200_000_i64);

    let (status, _) = get(app(&export), "/api/days/2024-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_static_styles() {
    let export = common::export();
    let (status, body) = get(app(&export), "/styles/main.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("margin: 0"));
}
