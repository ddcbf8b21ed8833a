//! Review API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_review_shows_first_due_card() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/review").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["card"]["id"], 1);
    assert_eq!(body["card"]["front"], fixtures::SAMPLE_FIRST_FRONT);
    assert_eq!(body["flipped"], false);
    assert_eq!(body["due_count"], 6);
}

#[tokio::test]
async fn test_flip_toggles() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: Value = server.post("/api/review/flip").await.json();
    assert_eq!(body["flipped"], true);

    let body: Value = server.post("/api/review/flip").await.json();
    assert_eq!(body["flipped"], false);
}

#[tokio::test]
async fn test_rate_pass_schedules_card() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server.post("/api/review/flip").await.assert_status_ok();

    let response = server.post("/api/review/rate").json(&fixtures::rating(5)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "pass");
    assert_eq!(body["graded"]["id"], 1);
    assert_eq!(body["graded"]["interval"], 2.5);
    assert_eq!(body["graded"]["easeFactor"], 2.6);
    assert_eq!(body["review"]["card"]["id"], 2);
    assert_eq!(body["review"]["flipped"], false);
    assert_eq!(body["review"]["due_count"], 5);
    assert_eq!(body["review"]["stats"]["studied"], 1);
    assert_eq!(body["review"]["stats"]["correct"], 1);

    let saved = ctx.saved().await.unwrap();
    assert_eq!(saved.lessons["default"].stats.studied, 1);
}

#[tokio::test]
async fn test_rate_fail_resets_interval() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/review/rate").json(&fixtures::rating(1)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "fail");
    assert_eq!(body["graded"]["interval"], 1.0);
    assert_eq!(body["review"]["stats"]["incorrect"], 1);
}

#[tokio::test]
async fn test_rate_out_of_range() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/review/rate").json(&fixtures::rating(6)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_rating");
}

#[tokio::test]
async fn test_rate_outside_byte_range() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for quality in [serde_json::json!({ "quality": 300 }), serde_json::json!({ "quality": -1 })] {
        let response = server.post("/api/review/rate").json(&quality).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid_rating");
    }

    let review: Value = server.get("/api/review").await.json();
    assert_eq!(review["stats"]["studied"], 0);
}

#[tokio::test]
async fn test_rate_with_nothing_due() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..6 {
        server
            .post("/api/review/rate")
            .json(&fixtures::rating(4))
            .await
            .assert_status_ok();
    }

    let review: Value = server.get("/api/review").await.json();
    assert_eq!(review["card"], Value::Null);
    assert_eq!(review["due_count"], 0);

    let response = server.post("/api/review/rate").json(&fixtures::rating(4)).await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "no_due_cards");
}

#[tokio::test]
async fn test_reset_progress() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/review/rate")
        .json(&fixtures::rating(5))
        .await
        .assert_status_ok();

    let response = server.post("/api/review/reset").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["due_count"], 6);
    assert_eq!(body["stats"]["studied"], 0);
    assert_eq!(body["stats"]["correct"], 0);

    let stats: Value = server.get("/api/stats").await.json();
    assert_eq!(stats["studied"], 0);
}
