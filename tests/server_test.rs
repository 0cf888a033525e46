//! HTTP router tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use advocacy_cms::model::Collection;
use advocacy_cms::server::{create_router, AppState};
use advocacy_cms::store::{ContentStore, MemoryStore};

const STAT_ID: &str = "1a2b3c4d-0000-4000-8000-000000000002";

async fn seeded() -> Arc<MemoryStore> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seed/content.json");
    Arc::new(MemoryStore::load_seed(&path).await.unwrap())
}

fn app(store: Arc<dyn ContentStore>) -> Router {
    let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    create_router(Arc::new(AppState { store }), &static_dir)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn put_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(Arc::new(MemoryStore::new())), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_home_renders_seeded_content() {
    let (status, body) = get(app(seeded().await), "/").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Community Members"));
    assert!(html.contains("/themes/mental-health"));
    assert!(html.contains("Ready to Make a Difference?"));
}

#[tokio::test]
async fn test_home_renders_defaults_when_store_is_down() {
    let mut store = MemoryStore::new();
    for c in Collection::ALL {
        store = store.with_failing_reads(c);
    }
    let (status, body) = get(app(Arc::new(store)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body)
        .unwrap()
        .contains("AI-Powered Advocacy for Inclusive Ghana"));
}

#[tokio::test]
async fn test_theme_page() {
    let (status, body) = get(app(seeded().await), "/themes/mental-health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Mental Health &amp; Wellness"));

    let (status, _) = get(app(seeded().await), "/themes/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_default_hero_and_call_to_action_targets_are_served() {
    let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
    let (_, body) = get(app(store.clone()), "/").await;
    let html = String::from_utf8(body).unwrap();

    for (path, marker) in [
        ("/analytics", "Total Impressions"),
        ("/community", "Total Members"),
        ("/auth", "Get In Touch"),
    ] {
        assert!(html.contains(&format!("href=\"{path}\"")), "{path} not linked");
        let (status, body) = get(app(store.clone()), path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(String::from_utf8(body).unwrap().contains(marker), "{path}");
    }
}

#[tokio::test]
async fn test_api_content_reports_degraded_sections() {
    let store = seeded().await;
    let store = Arc::new(
        Arc::try_unwrap(store)
            .unwrap()
            .with_failing_reads(Collection::Testimonials),
    );
    let (status, body) = get(app(store), "/api/content").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["page"]["stats"].as_array().unwrap().len(), 4);
    assert_eq!(json["page"]["testimonials"], json!([]));
    assert_eq!(json["failures"][0]["collection"], "testimonials");
    assert_eq!(json["page"]["hero"]["primary"]["href"], "/analytics");
}

#[tokio::test]
async fn test_dashboard_content_unavailable() {
    let mut store = MemoryStore::new();
    for c in Collection::ALL {
        store = store.with_failing_reads(c);
    }
    let (status, _) = get(app(Arc::new(store)), "/api/dashboard/content").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_save_collection_round_trip() {
    let store = seeded().await;

    let (_, body) = get(app(store.clone()), "/api/dashboard/content").await;
    let content: Value = serde_json::from_slice(&body).unwrap();
    let mut stats = content["stats"].clone();
    for stat in stats.as_array_mut().unwrap() {
        if stat["id"] == STAT_ID {
            stat["value"] = json!("16k");
        }
    }

    let (status, report) =
        put_json(app(store.clone()), "/api/dashboard/content/stats_cards", &stats).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["status"], "success");
    assert_eq!(report["notification"]["variant"], "default");

    let (_, body) = get(app(store), "/api/dashboard/content").await;
    let content: Value = serde_json::from_slice(&body).unwrap();
    let saved = content["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == STAT_ID)
        .unwrap();
    assert_eq!(saved["value"], "16k");
    assert_eq!(saved["label"], "Community Members");
}

#[tokio::test]
async fn test_save_partial_failure_is_multi_status() {
    let store = seeded().await;
    store.set_failing_write(STAT_ID.parse().unwrap()).await;

    let (_, body) = get(app(store.clone()), "/api/dashboard/content").await;
    let content: Value = serde_json::from_slice(&body).unwrap();

    let (status, report) = put_json(
        app(store),
        "/api/dashboard/content/stats_cards",
        &content["stats"],
    )
    .await;
    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(report["status"], "partial_failure");
    assert_eq!(report["notification"]["variant"], "destructive");
}

#[tokio::test]
async fn test_save_hero_failure_is_bad_gateway() {
    let store = seeded().await;
    let (_, body) = get(app(store.clone()), "/api/dashboard/content").await;
    let content: Value = serde_json::from_slice(&body).unwrap();
    let hero = content["hero"].clone();
    store
        .set_failing_write(hero["id"].as_str().unwrap().parse().unwrap())
        .await;

    let (status, report) =
        put_json(app(store), "/api/dashboard/content/hero_content", &hero).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(report["notification"]["title"], "Failed to update hero section");
}

#[tokio::test]
async fn test_unchanged_hero_put_keeps_null_columns() {
    let store = Arc::new(MemoryStore::new());
    let Value::Object(row) = json!({"title": "T", "subtitle": null, "cta_primary_text": null})
    else {
        unreachable!()
    };
    store.insert(Collection::HeroContent, row).await;
    let before = store.rows(Collection::HeroContent).await;

    let (_, body) = get(app(store.clone()), "/api/dashboard/content").await;
    let content: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(content["hero"]["subtitle"], Value::Null);
    assert_eq!(content["hero"]["cta_primary_link"], Value::Null);

    let (status, _) = put_json(
        app(store.clone()),
        "/api/dashboard/content/hero_content",
        &content["hero"],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.rows(Collection::HeroContent).await, before);
}

#[tokio::test]
async fn test_save_rejects_bad_requests() {
    let store = seeded().await;

    let (status, _) = put_json(app(store.clone()), "/api/dashboard/content/campaigns", &json!([])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = put_json(
        app(store),
        "/api/dashboard/content/testimonials",
        &json!({"not": "a list"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_dashboard_pages() {
    let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());

    let (status, body) = get(app(store.clone()), "/api/dashboard/campaigns").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["campaigns"][3]["status"], "planning");

    let (_, body) = get(app(store.clone()), "/api/dashboard/community").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["members"][0]["initials"], "SJ");

    let (status, _) = get(app(store.clone()), "/api/dashboard/overview").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(app(store.clone()), "/api/dashboard/analytics").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(app(store), "/api/dashboard/fields").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["collection"], "hero_content");
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let (status, body) = get(app(Arc::new(MemoryStore::new())), "/static/site.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}
