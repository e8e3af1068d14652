//! Integration Tests: Trend endpoints
//!
//! Coverage:
//! - On-demand computation when no snapshot is cached
//! - Cached snapshot served until an explicit refresh
//! - Health and metrics endpoints

mod common;

use actix_web::{http::StatusCode, test, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use social_content::db::SeedData;

fn seeded_posts() -> SeedData {
    let now = Utc::now();
    SeedData {
        users: common::users(),
        posts: vec![
            common::post(1, 1, "Learning #Rust today", now - Duration::minutes(5)),
            common::post(2, 2, "#rust and #go", now - Duration::minutes(4)),
            common::post(3, 3, "More #RUST", now - Duration::minutes(3)),
            common::post(4, 1, "#go is fine too", now - Duration::minutes(2)),
            common::post(5, 2, "no tags", now - Duration::minutes(1)),
        ],
        ..SeedData::default()
    }
}

#[actix_web::test]
async fn test_trends_computed_on_first_request() {
    let state = common::state_with(seeded_posts());
    let app =
        test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/trends").to_request();
    let snapshot: Value = test::call_and_read_body_json(&app, req).await;

    let trends = snapshot["trends"].as_array().unwrap();
    assert_eq!(trends.len(), 1);
    // Seeded posts are scanned newest first, so the latest casing names the tag
    assert_eq!(trends[0]["name"], "#RUST");
    assert_eq!(trends[0]["total_count"], 3);

    let sparkline: Vec<u64> = trends[0]["sparkline"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();
    assert_eq!(sparkline.len(), 7);
    assert!(sparkline.iter().sum::<u64>() <= 3);
    let expected = if sparkline[6] > sparkline[0] { "up" } else { "down" };
    assert_eq!(trends[0]["trend"], expected);
}

#[actix_web::test]
async fn test_cached_snapshot_until_refresh() {
    let state = common::state_with(seeded_posts());
    let app =
        test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/trends").to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first["trends"].as_array().unwrap().len(), 1);

    // A third #go post makes it trend, but only after a refresh
    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(json!({"user_id": 3, "content": "#Go all the way"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/v1/trends").to_request();
    let cached: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cached["computed_at"], first["computed_at"]);
    assert_eq!(cached["trends"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/trends/refresh")
        .to_request();
    let refreshed: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = refreshed["trends"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    // Tied at three posts; the newest post is scanned first, so #Go leads
    assert_eq!(names, vec!["#Go", "#RUST"]);
}

#[actix_web::test]
async fn test_no_posts_yield_empty_trends() {
    let state = common::empty_state();
    let app =
        test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/trends").to_request();
    let snapshot: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(snapshot["trends"], json!([]));
}

#[actix_web::test]
async fn test_health_and_metrics() {
    let state = common::empty_state();
    let app =
        test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "ok");

    // Touch a collector so the registry is not empty
    let req = test::TestRequest::post()
        .uri("/api/v1/trends/refresh")
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("trends_refresh_total"));
}
