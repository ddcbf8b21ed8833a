//! Backup export and import API tests.

mod common;

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_export_envelope() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/backup").await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "application/json");
    let disposition = response.header(header::CONTENT_DISPOSITION);
    assert!(disposition
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=\"study-quest-backup-"));

    let body: Value = response.json();
    assert_eq!(body["currentLessonId"], "default");
    assert!(body["exportDate"].is_string());
    let cards = body["lessons"]["default"]["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[0]["easeFactor"], 2.5);
    assert!(cards[0]["nextReview"].is_i64());
}

#[tokio::test]
async fn test_import_replaces_library() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/backup")
        .text(fixtures::backup_file("imported", "Imported", 3))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["current_lesson_id"], "imported");
    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["name"], "Imported");
    assert_eq!(lessons[0]["card_count"], 3);
    assert_eq!(lessons[0]["due_count"], 3);

    let saved = ctx.saved().await.unwrap();
    assert_eq!(saved.current_lesson_id, "imported");
}

#[tokio::test]
async fn test_export_then_import_keeps_progress() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server
        .post("/api/review/rate")
        .json(&fixtures::rating(5))
        .await
        .assert_status_ok();
    let exported = server.get("/api/backup").await.text();

    let other = TestContext::new();
    let other_server = other.server();
    other_server.post("/api/backup").text(exported).await.assert_status_ok();

    let cards: Vec<Value> = other_server.get("/api/cards").await.json();
    assert_eq!(cards[0]["interval"], 2.5);
    let stats: Value = other_server.get("/api/stats").await.json();
    assert_eq!(stats["studied"], 1);
}

#[tokio::test]
async fn test_import_rejects_card_without_front() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let file = r#"{
        "lessons": { "bad": { "name": "Bad", "cards": [{ "id": 1, "back": "B" }] } },
        "currentLessonId": "bad"
    }"#;

    let response = server.post("/api/backup").text(file).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");

    let lessons: Value = server.get("/api/lessons").await.json();
    assert_eq!(lessons["current_lesson_id"], "default");
}

#[tokio::test]
async fn test_import_rejects_malformed_json() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/backup").text("{\"lessons\": [").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.saved().await.is_none());
}

#[tokio::test]
async fn test_import_browser_export() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let file = r#"{
        "lessons": {
            "1700000000000": {
                "name": "French",
                "cards": [
                    {"id": 1700000000001, "front": "Bonjour", "back": "Hello",
                     "nextReview": 1700773967175.8, "interval": 8.64, "easeFactor": 2.36}
                ],
                "stats": {"studied": 2, "correct": 2, "incorrect": 0}
            }
        },
        "currentLessonId": "1700000000000",
        "exportDate": "2023-11-24T10:00:00.000Z"
    }"#;

    let response = server.post("/api/backup").text(file).await;

    response.assert_status_ok();
    let cards: Vec<Value> = server.get("/api/cards").await.json();
    assert_eq!(cards[0]["id"], 1_700_000_000_001_i64);
    assert_eq!(cards[0]["nextReview"], 1_700_773_967_175_i64);
}

#[tokio::test]
async fn test_card_added_after_max_id_gets_free_id() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let file = serde_json::json!({
        "lessons": {
            "big": { "name": "Big", "cards": [{ "id": i64::MAX, "front": "Q", "back": "A" }] }
        },
        "currentLessonId": "big"
    })
    .to_string();
    server.post("/api/backup").text(file).await.assert_status_ok();

    let response = server
        .post("/api/cards")
        .json(&fixtures::new_card("Next", "One"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let card: Value = response.json();
    assert_eq!(card["id"], 1);
}
